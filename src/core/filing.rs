//! Form 941 filing lifecycle business logic.
//!
//! Filings are created in draft by payroll sync or manual entry, refreshed
//! by recalculation as wage data and deposits change, and frozen once
//! submitted. Recalculation rederives the computed tax totals from the wage
//! bases and the deposit ledger in a single atomic update.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, Set, prelude::*};

use crate::{
    core::{calendar, deposit},
    entities::{Filing, FilingStatus, form941_filing},
    errors::{Error, Result},
};

/// Combined employer + employee Social Security rate (6.2% each).
pub const SOCIAL_SECURITY_RATE: Decimal = dec!(0.124);

/// Combined employer + employee Medicare rate (1.45% each).
pub const MEDICARE_RATE: Decimal = dec!(0.029);

/// Creates an empty draft filing for a quarter.
///
/// The upsert key is (account, year, quarter): an existing filing for the
/// quarter is returned unchanged rather than duplicated.
pub async fn create_filing(
    db: &DatabaseConnection,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
) -> Result<form941_filing::Model> {
    if account_id.trim().is_empty() {
        return Err(Error::InvalidRequest {
            message: "account id cannot be blank".to_string(),
        });
    }
    calendar::quarter_bounds(tax_year, quarter)?;

    if let Some(existing) = get_filing_for_quarter(db, account_id, tax_year, quarter).await? {
        return Ok(existing);
    }

    let now = Utc::now().naive_utc();
    let model = form941_filing::ActiveModel {
        account_id: Set(account_id.to_string()),
        business_name: Set(None),
        ein: Set(None),
        tax_year: Set(tax_year),
        quarter: Set(quarter),
        employee_count: Set(None),
        wages_tips_compensation: Set(Decimal::ZERO),
        federal_income_tax_withheld: Set(Decimal::ZERO),
        taxable_social_security_wages: Set(Decimal::ZERO),
        taxable_medicare_wages: Set(Decimal::ZERO),
        social_security_tax: Set(Decimal::ZERO),
        medicare_tax: Set(Decimal::ZERO),
        total_taxes_after_adjustments: Set(Decimal::ZERO),
        month1_liability: Set(Decimal::ZERO),
        month2_liability: Set(Decimal::ZERO),
        month3_liability: Set(Decimal::ZERO),
        total_deposits: Set(Decimal::ZERO),
        balance_due: Set(Decimal::ZERO),
        deposit_schedule: Set(None),
        status: Set(FilingStatus::Draft),
        validation_passed: Set(None),
        validation_errors: Set(None),
        validation_warnings: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Finds the filing for one account quarter, if any.
pub async fn get_filing_for_quarter(
    db: &DatabaseConnection,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
) -> Result<Option<form941_filing::Model>> {
    Filing::find()
        .filter(form941_filing::Column::AccountId.eq(account_id))
        .filter(form941_filing::Column::TaxYear.eq(tax_year))
        .filter(form941_filing::Column::Quarter.eq(quarter))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Recomputes the filing's derived tax totals from its wage bases and the
/// deposit ledger.
///
/// Social Security and Medicare taxes are the statutory rates applied to
/// their wage bases; the quarter total adds federal withholding; the balance
/// due is the total less deposits, floored at zero (an overpayment shows as
/// a zero balance, not a negative one).
pub async fn recalculate_filing(
    db: &DatabaseConnection,
    filing_id: i64,
) -> Result<form941_filing::Model> {
    let filing = Filing::find_by_id(filing_id)
        .one(db)
        .await?
        .ok_or(Error::FilingNotFound { filing_id })?;
    if filing.status == FilingStatus::Submitted {
        return Err(Error::FilingSubmitted { filing_id });
    }

    let social_security_tax = filing.taxable_social_security_wages * SOCIAL_SECURITY_RATE;
    let medicare_tax = filing.taxable_medicare_wages * MEDICARE_RATE;
    let total_taxes =
        filing.federal_income_tax_withheld + social_security_tax + medicare_tax;

    let deposits = deposit::get_deposits_for_quarter(
        db,
        &filing.account_id,
        filing.tax_year,
        filing.quarter,
    )
    .await?;
    let total_deposits: Decimal = deposits.iter().map(|d| d.amount).sum();
    let balance_due = (total_taxes - total_deposits).max(Decimal::ZERO);

    let mut active: form941_filing::ActiveModel = filing.into();
    active.social_security_tax = Set(social_security_tax);
    active.medicare_tax = Set(medicare_tax);
    active.total_taxes_after_adjustments = Set(total_taxes);
    active.total_deposits = Set(total_deposits);
    active.balance_due = Set(balance_due);
    active.updated_at = Set(Utc::now().naive_utc());

    active.update(db).await.map_err(Into::into)
}

/// Marks a draft filing as submitted.
///
/// Submission requires a passing validation run against the filing's current
/// contents. Submitting an already-submitted filing is a no-op.
pub async fn submit_filing(
    db: &DatabaseConnection,
    filing_id: i64,
) -> Result<form941_filing::Model> {
    let filing = Filing::find_by_id(filing_id)
        .one(db)
        .await?
        .ok_or(Error::FilingNotFound { filing_id })?;

    if filing.status == FilingStatus::Submitted {
        return Ok(filing);
    }
    if filing.validation_passed != Some(true) {
        return Err(Error::InvalidRequest {
            message: format!(
                "filing {filing_id} has not passed validation and cannot be submitted"
            ),
        });
    }

    let mut active: form941_filing::ActiveModel = filing.into();
    active.status = Set(FilingStatus::Submitted);
    active.updated_at = Set(Utc::now().naive_utc());

    active.update(db).await.map_err(Into::into)
}
