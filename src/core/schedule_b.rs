//! Schedule B generation business logic.
//!
//! Semi-weekly depositors must report tax liability per payroll date. This
//! module pulls the quarter's payroll records from the injected payroll data
//! source, computes each date's combined liability (employee withholding plus
//! the matching employer FICA share), derives the deposit due date from the
//! quarter calendar, and replaces the filing's stored entries wholesale.
//! Monthly depositors get no entries; their payroll activity is aggregated
//! into the filing's three monthly liability figures instead.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, Set, TransactionTrait, prelude::*};
use std::time::Duration;

use crate::{
    config::engine::EngineSettings,
    core::calendar,
    entities::{DepositSchedule, Filing, FilingStatus, ScheduleB, schedule_b_entry},
    errors::{Error, Result},
    payroll::{PayrollDataSource, PayrollRecord},
};

/// Employer share multiplier: FICA withholding is matched dollar-for-dollar,
/// so each withheld dollar owes two.
const FICA_COMBINED: Decimal = dec!(2);

/// Result of a Schedule B generation run.
#[derive(Debug, Clone)]
pub struct ScheduleBOutcome {
    /// The stored entries, in payroll-date order (empty for monthly
    /// depositors)
    pub entries: Vec<schedule_b_entry::Model>,
    /// Number of entries stored
    pub count: usize,
    /// Per-month liability aggregation, present for monthly depositors
    pub monthly_totals: Option<[Decimal; 3]>,
    /// Generation summary
    pub message: String,
}

/// Generates Schedule B entries for a filing's quarter.
///
/// Preconditions: the filing exists, belongs to the account, and is still a
/// draft; the account has an active payroll connection. The payroll-sync
/// calls are bounded by the configured timeout and surface as retryable
/// errors on failure, so a stalled provider never blocks the engine or
/// silently truncates the entries.
pub async fn generate_schedule_b(
    db: &DatabaseConnection,
    source: &dyn PayrollDataSource,
    settings: &EngineSettings,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
    filing_id: i64,
) -> Result<ScheduleBOutcome> {
    if account_id.trim().is_empty() {
        return Err(Error::InvalidRequest {
            message: "account id cannot be blank".to_string(),
        });
    }
    let (quarter_start, quarter_end) = calendar::quarter_bounds(tax_year, quarter)?;

    let filing = Filing::find_by_id(filing_id)
        .one(db)
        .await?
        .ok_or(Error::FilingNotFound { filing_id })?;
    if filing.account_id != account_id {
        return Err(Error::FilingNotFound { filing_id });
    }
    if filing.status == FilingStatus::Submitted {
        return Err(Error::FilingSubmitted { filing_id });
    }

    let timeout_secs = settings.payroll.sync_timeout_secs;

    let active = bounded(timeout_secs, source.is_active(account_id)).await?;
    if !active {
        return Err(Error::NoPayrollConnection {
            account_id: account_id.to_string(),
        });
    }

    let records = bounded(
        timeout_secs,
        source.records_in_range(account_id, quarter_start, quarter_end),
    )
    .await?;

    // The source contract is an inclusive range, but stray records outside
    // the quarter would corrupt the breakdown, so filter here as well
    let records: Vec<PayrollRecord> = records
        .into_iter()
        .filter(|r| r.payroll_date >= quarter_start && r.payroll_date <= quarter_end)
        .collect();

    if filing.deposit_schedule == Some(DepositSchedule::Monthly) {
        return aggregate_monthly(db, filing, quarter, &records).await;
    }

    let txn = db.begin().await?;

    // Replace-on-rerun: stale entries from a previous sync are dropped in
    // the same transaction that writes the new set
    ScheduleB::delete_many()
        .filter(schedule_b_entry::Column::FilingId.eq(filing_id))
        .exec(&txn)
        .await?;

    let now = Utc::now().naive_utc();
    let mut entries = Vec::with_capacity(records.len());
    for record in &records {
        let liability = record_liability(record);
        let entry = schedule_b_entry::ActiveModel {
            account_id: Set(filing.account_id.clone()),
            filing_id: Set(filing_id),
            payroll_date: Set(record.payroll_date),
            tax_liability_date: Set(record.payroll_date),
            deposit_due_date: Set(calendar::semi_weekly_due_date(record.payroll_date)),
            tax_liability: Set(liability),
            federal_income_tax: Set(record.federal_income_tax),
            social_security_tax: Set(record.social_security_withholding * FICA_COMBINED),
            medicare_tax: Set(record.medicare_withholding * FICA_COMBINED),
            source: Set(record.source.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        entries.push(entry.insert(&txn).await?);
    }

    txn.commit().await?;

    entries.sort_by_key(|e| e.payroll_date);
    let count = entries.len();
    let message = format!("Generated {count} Schedule B entries for {tax_year} Q{quarter}");

    Ok(ScheduleBOutcome {
        entries,
        count,
        monthly_totals: None,
        message,
    })
}

/// Combined deposit obligation for one payroll date.
fn record_liability(record: &PayrollRecord) -> Decimal {
    record.federal_income_tax
        + record.social_security_withholding * FICA_COMBINED
        + record.medicare_withholding * FICA_COMBINED
}

/// Monthly depositors report one liability per month instead of Schedule B
/// entries; fold the quarter's payroll records into the filing's three
/// monthly figures.
async fn aggregate_monthly(
    db: &DatabaseConnection,
    filing: crate::entities::FilingModel,
    quarter: i32,
    records: &[PayrollRecord],
) -> Result<ScheduleBOutcome> {
    use chrono::Datelike;

    let mut totals = [Decimal::ZERO; 3];
    for record in records {
        if let Some(position) = calendar::month_of_quarter(quarter, record.payroll_date.month()) {
            totals[position as usize - 1] += record_liability(record);
        }
    }

    let tax_year = filing.tax_year;
    let filing_id = filing.id;

    let txn = db.begin().await?;

    // Entries left over from before a monthly reclassification are stale
    ScheduleB::delete_many()
        .filter(schedule_b_entry::Column::FilingId.eq(filing_id))
        .exec(&txn)
        .await?;

    let mut filing_active: crate::entities::form941_filing::ActiveModel = filing.into();
    filing_active.month1_liability = Set(totals[0]);
    filing_active.month2_liability = Set(totals[1]);
    filing_active.month3_liability = Set(totals[2]);
    filing_active.updated_at = Set(Utc::now().naive_utc());
    filing_active.update(&txn).await?;

    txn.commit().await?;

    let message = format!(
        "Monthly depositor: no Schedule B entries generated for {tax_year} Q{quarter}; \
         monthly liabilities updated"
    );

    Ok(ScheduleBOutcome {
        entries: Vec::new(),
        count: 0,
        monthly_totals: Some(totals),
        message,
    })
}

/// Bounds a payroll-source call with the configured timeout, mapping the
/// elapsed case to a retryable error.
async fn bounded<T>(
    timeout_secs: u64,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(Duration::from_secs(timeout_secs), fut)
        .await
        .map_err(|_| Error::PayrollTimeout {
            seconds: timeout_secs,
        })?
}
