//! Form 941 validation business logic.
//!
//! A fixed battery of cross-field checks run against a fully populated
//! filing. Blocking problems land in `errors`; discrepancies the filer may
//! legitimately explain (rounding, prior-quarter adjustments) land in
//! `warnings` and never block submission. Every check re-derives from the
//! filing's current field values, so the validator is stateless and
//! idempotent per call.

use chrono::Utc;
use regex::Regex;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set, prelude::*};
use std::sync::LazyLock;

use crate::{
    core::filing::{MEDICARE_RATE, SOCIAL_SECURITY_RATE},
    entities::{DepositSchedule, Filing, FilingStatus, form941_filing},
    errors::{Error, Result},
};

#[allow(clippy::expect_used)]
static EIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}-\d{7}$").expect("static EIN regex")
});

/// Outcome of a validation run. Also written back onto draft filings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// True exactly when `errors` is empty; warnings never affect it
    pub validation_passed: bool,
    /// Blocking problems - submission must be refused while any exist
    pub errors: Vec<String>,
    /// Advisory discrepancies surfaced to the filer
    pub warnings: Vec<String>,
}

/// Validates a filing and writes the result back onto it.
///
/// Submitted filings are immutable: the report is still computed and
/// returned, but nothing is persisted.
pub async fn validate_filing(
    db: &DatabaseConnection,
    filing_id: i64,
    tolerance: Decimal,
) -> Result<ValidationReport> {
    let filing = Filing::find_by_id(filing_id)
        .one(db)
        .await?
        .ok_or(Error::FilingNotFound { filing_id })?;

    let report = run_checks(&filing, tolerance);

    if filing.status == FilingStatus::Draft {
        let mut active: form941_filing::ActiveModel = filing.into();
        active.validation_passed = Set(Some(report.validation_passed));
        active.validation_errors = Set(Some(serde_json::to_value(&report.errors)?));
        active.validation_warnings = Set(Some(serde_json::to_value(&report.warnings)?));
        active.updated_at = Set(Utc::now().naive_utc());
        active.update(db).await?;
    }

    Ok(report)
}

/// The full check battery as a pure function of the filing's fields.
#[must_use]
pub fn run_checks(filing: &form941_filing::Model, tolerance: Decimal) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Required fields
    if filing
        .business_name
        .as_deref()
        .is_none_or(|name| name.trim().is_empty())
    {
        errors.push("Business name is required".to_string());
    }
    match filing.ein.as_deref() {
        None | Some("") => errors.push("EIN is required".to_string()),
        Some(ein) if !EIN_PATTERN.is_match(ein) => {
            errors.push(format!("EIN '{ein}' must match the format NN-NNNNNNN"));
        }
        Some(_) => {}
    }
    if filing.employee_count.is_none() {
        errors.push("Employee count is required".to_string());
    }

    // Wage relationships - a taxable base above total wages is logically
    // impossible, so these are always errors
    if filing.taxable_social_security_wages > filing.wages_tips_compensation {
        errors.push(format!(
            "Taxable Social Security wages (${:.2}) cannot exceed total wages (${:.2})",
            filing.taxable_social_security_wages.round_dp(2),
            filing.wages_tips_compensation.round_dp(2)
        ));
    }
    if filing.taxable_medicare_wages > filing.wages_tips_compensation {
        errors.push(format!(
            "Taxable Medicare wages (${:.2}) cannot exceed total wages (${:.2})",
            filing.taxable_medicare_wages.round_dp(2),
            filing.wages_tips_compensation.round_dp(2)
        ));
    }

    // Monthly depositors' liability breakdown must tie out against the
    // quarter total
    if filing.deposit_schedule == Some(DepositSchedule::Monthly) {
        let monthly_sum =
            filing.month1_liability + filing.month2_liability + filing.month3_liability;
        if (monthly_sum - filing.total_taxes_after_adjustments).abs() > tolerance {
            errors.push(format!(
                "Monthly liabilities (${:.2}) do not reconcile with total taxes (${:.2})",
                monthly_sum.round_dp(2),
                filing.total_taxes_after_adjustments.round_dp(2)
            ));
        }
    }

    // Recomputed tax figures - mismatches are advisory because the filer
    // may carry legitimate rounding or prior-quarter adjustments
    let expected_ss = filing.taxable_social_security_wages * SOCIAL_SECURITY_RATE;
    if (expected_ss - filing.social_security_tax).abs() > tolerance {
        warnings.push(format!(
            "Social Security tax (${:.2}) differs from the expected ${:.2} \
             (12.4% of taxable Social Security wages)",
            filing.social_security_tax.round_dp(2),
            expected_ss.round_dp(2)
        ));
    }

    let expected_medicare = filing.taxable_medicare_wages * MEDICARE_RATE;
    if (expected_medicare - filing.medicare_tax).abs() > tolerance {
        warnings.push(format!(
            "Medicare tax (${:.2}) differs from the expected ${:.2} \
             (2.9% of taxable Medicare wages)",
            filing.medicare_tax.round_dp(2),
            expected_medicare.round_dp(2)
        ));
    }

    let expected_balance = filing.total_taxes_after_adjustments - filing.total_deposits;
    if (expected_balance - filing.balance_due).abs() > tolerance {
        warnings.push(format!(
            "Balance due (${:.2}) differs from the expected ${:.2} \
             (total taxes minus total deposits)",
            filing.balance_due.round_dp(2),
            expected_balance.round_dp(2)
        ));
    }

    if filing.deposit_schedule.is_none() {
        warnings.push(
            "No deposit schedule set; run the lookback classification before filing".to_string(),
        );
    }

    ValidationReport {
        validation_passed: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use rust_decimal_macros::dec;

    const TOLERANCE: Decimal = dec!(1.00);

    /// A filing every check is satisfied with: taxes recompute exactly,
    /// months tie out, balance is consistent.
    fn base_filing() -> form941_filing::Model {
        let now = Utc::now().naive_utc();
        form941_filing::Model {
            id: 1,
            account_id: "acct-500".to_string(),
            business_name: Some("Acme Widget Co".to_string()),
            ein: Some("12-3456789".to_string()),
            tax_year: 2025,
            quarter: 1,
            employee_count: Some(12),
            wages_tips_compensation: dec!(50000),
            federal_income_tax_withheld: dec!(5000),
            taxable_social_security_wages: dec!(40000),
            taxable_medicare_wages: dec!(50000),
            social_security_tax: dec!(4960),
            medicare_tax: dec!(1450),
            total_taxes_after_adjustments: dec!(11410),
            month1_liability: dec!(4000),
            month2_liability: dec!(4000),
            month3_liability: dec!(3410),
            total_deposits: dec!(11410),
            balance_due: Decimal::ZERO,
            deposit_schedule: Some(DepositSchedule::Monthly),
            status: FilingStatus::Draft,
            validation_passed: None,
            validation_errors: None,
            validation_warnings: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_clean_filing_passes() {
        let report = run_checks(&base_filing(), TOLERANCE);
        assert!(report.validation_passed);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_errors() {
        let mut filing = base_filing();
        filing.business_name = None;
        filing.ein = None;
        filing.employee_count = None;

        let report = run_checks(&filing, TOLERANCE);
        assert!(!report.validation_passed);
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn test_blank_business_name_is_missing() {
        let mut filing = base_filing();
        filing.business_name = Some("   ".to_string());

        let report = run_checks(&filing, TOLERANCE);
        assert!(report.errors.iter().any(|e| e.contains("Business name")));
    }

    #[test]
    fn test_ein_format_checked() {
        let mut filing = base_filing();
        filing.ein = Some("123456789".to_string());

        let report = run_checks(&filing, TOLERANCE);
        assert!(!report.validation_passed);
        assert!(report.errors.iter().any(|e| e.contains("NN-NNNNNNN")));

        filing.ein = Some("1-23456789".to_string());
        let report = run_checks(&filing, TOLERANCE);
        assert!(!report.validation_passed);
    }

    #[test]
    fn test_ss_wages_above_total_always_error() {
        let mut filing = base_filing();
        filing.taxable_social_security_wages = dec!(60000);
        filing.wages_tips_compensation = dec!(50000);
        // keep the recomputed-tax warning out of the way
        filing.social_security_tax = dec!(7440);

        let report = run_checks(&filing, TOLERANCE);
        assert!(!report.validation_passed);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("cannot exceed total wages"))
        );
    }

    #[test]
    fn test_medicare_wages_above_total_always_error() {
        let mut filing = base_filing();
        filing.taxable_medicare_wages = dec!(50001);
        filing.medicare_tax = dec!(1450.029);

        let report = run_checks(&filing, TOLERANCE);
        assert!(!report.validation_passed);
    }

    #[test]
    fn test_monthly_reconciliation_beyond_tolerance_fails() {
        let mut filing = base_filing();
        filing.month3_liability = dec!(3408); // off by 2.00

        let report = run_checks(&filing, TOLERANCE);
        assert!(!report.validation_passed);
        assert!(report.errors.iter().any(|e| e.contains("reconcile")));
    }

    #[test]
    fn test_monthly_reconciliation_within_tolerance_passes() {
        let mut filing = base_filing();
        filing.month3_liability = dec!(3409.50); // off by 0.50

        let report = run_checks(&filing, TOLERANCE);
        assert!(report.validation_passed);
    }

    #[test]
    fn test_semi_weekly_skips_monthly_reconciliation() {
        let mut filing = base_filing();
        filing.deposit_schedule = Some(DepositSchedule::SemiWeekly);
        filing.month1_liability = Decimal::ZERO;
        filing.month2_liability = Decimal::ZERO;
        filing.month3_liability = Decimal::ZERO;

        let report = run_checks(&filing, TOLERANCE);
        assert!(report.validation_passed);
    }

    #[test]
    fn test_recomputed_ss_tax_mismatch_is_warning_only() {
        let mut filing = base_filing();
        filing.social_security_tax = dec!(4900); // expected 4960

        let report = run_checks(&filing, TOLERANCE);
        assert!(report.validation_passed);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("$4960.00"));
    }

    #[test]
    fn test_recomputed_medicare_tax_mismatch_is_warning_only() {
        let mut filing = base_filing();
        filing.medicare_tax = dec!(1400); // expected 1450

        let report = run_checks(&filing, TOLERANCE);
        assert!(report.validation_passed);
        assert!(report.warnings.iter().any(|w| w.contains("Medicare")));
    }

    #[test]
    fn test_balance_due_mismatch_is_warning_only() {
        let mut filing = base_filing();
        filing.balance_due = dec!(500); // expected 0

        let report = run_checks(&filing, TOLERANCE);
        assert!(report.validation_passed);
        assert!(report.warnings.iter().any(|w| w.contains("Balance due")));
    }

    #[test]
    fn test_missing_schedule_is_warning_only() {
        let mut filing = base_filing();
        filing.deposit_schedule = None;

        let report = run_checks(&filing, TOLERANCE);
        assert!(report.validation_passed);
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.contains("deposit schedule"))
        );
    }

    #[tokio::test]
    async fn test_validate_writes_back_to_draft() -> Result<()> {
        let db = setup_test_db().await?;
        let mut filing = base_filing();
        filing.id = 0;
        filing.business_name = None;

        let mut active: form941_filing::ActiveModel = filing.into();
        active.id = sea_orm::ActiveValue::NotSet;
        let stored = active.insert(&db).await?;

        let report = validate_filing(&db, stored.id, TOLERANCE).await?;
        assert!(!report.validation_passed);

        let refreshed = Filing::find_by_id(stored.id).one(&db).await?.unwrap();
        assert_eq!(refreshed.validation_passed, Some(false));
        let errors: Vec<String> =
            serde_json::from_value(refreshed.validation_errors.unwrap()).unwrap();
        assert_eq!(errors, report.errors);

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_does_not_mutate_submitted() -> Result<()> {
        let db = setup_test_db().await?;
        let mut filing = base_filing();
        filing.id = 0;
        filing.status = FilingStatus::Submitted;

        let mut active: form941_filing::ActiveModel = filing.into();
        active.id = sea_orm::ActiveValue::NotSet;
        let stored = active.insert(&db).await?;

        let report = validate_filing(&db, stored.id, TOLERANCE).await?;
        assert!(report.validation_passed);

        let refreshed = Filing::find_by_id(stored.id).one(&db).await?.unwrap();
        assert_eq!(refreshed.validation_passed, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_validate_missing_filing() -> Result<()> {
        let db = setup_test_db().await?;
        let result = validate_filing(&db, 777, TOLERANCE).await;
        assert!(matches!(
            result,
            Err(Error::FilingNotFound { filing_id: 777 })
        ));
        Ok(())
    }
}
