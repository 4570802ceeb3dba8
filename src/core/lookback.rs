//! Lookback classification business logic.
//!
//! The IRS sets an employer's deposit schedule for a year from the total tax
//! liability filed across the four quarters of the lookback window (July 1 of
//! the prior year through June 30 of the lookback year). Totals above the
//! threshold classify the account as a semi-weekly depositor; anything else
//! stays monthly. A change versus the prior year's classification is recorded
//! exactly once in the append-only schedule history.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, TryIntoModel, prelude::*};

use crate::{
    core::calendar,
    entities::{
        DepositSchedule, Filing, LookbackPeriod, ScheduleHistory, deposit_schedule_history,
        form941_filing, lookback_period,
    },
    errors::{Error, Result},
};

/// Lookback liability above this amount classifies the account semi-weekly.
pub const LOOKBACK_THRESHOLD: Decimal = dec!(50000);

/// Result of a lookback classification run.
#[derive(Debug, Clone)]
pub struct LookbackOutcome {
    /// The stored lookback period row
    pub period: lookback_period::Model,
    /// Human-readable classification summary
    pub message: String,
    /// Present when one or more trailing quarters had no filed return
    pub warning: Option<String>,
}

/// Classifies an account's deposit schedule for `lookback_year`.
///
/// Sums the filed liabilities for Q3/Q4 of the prior year and Q1/Q2 of the
/// lookback year. Quarters with no stored filing contribute zero but are
/// called out in the outcome's warning so "no data" is distinguishable from
/// "zero liability". The stored lookback period is overwritten on rerun; a
/// schedule-history row is appended only when the newly computed schedule
/// differs from what is already stored for this year, so reruns with
/// unchanged filings never append duplicates.
pub async fn compute_lookback(
    db: &DatabaseConnection,
    account_id: &str,
    lookback_year: i32,
) -> Result<LookbackOutcome> {
    if account_id.trim().is_empty() {
        return Err(Error::InvalidRequest {
            message: "account id cannot be blank".to_string(),
        });
    }
    if !(2000..=2100).contains(&lookback_year) {
        return Err(Error::InvalidRequest {
            message: format!("lookback year {lookback_year} out of range"),
        });
    }

    let (window_start, window_end) = calendar::lookback_window(lookback_year)?;

    // The four trailing quarters, oldest first
    let quarters = [
        (lookback_year - 1, 3),
        (lookback_year - 1, 4),
        (lookback_year, 1),
        (lookback_year, 2),
    ];

    let mut liabilities = [Decimal::ZERO; 4];
    let mut missing = Vec::new();
    for (i, (year, quarter)) in quarters.into_iter().enumerate() {
        match filed_liability(db, account_id, year, quarter).await? {
            Some(amount) => liabilities[i] = amount,
            None => missing.push(format!("{year} Q{quarter}")),
        }
    }

    let total_liability: Decimal = liabilities.iter().copied().sum();
    let exceeds_threshold = total_liability > LOOKBACK_THRESHOLD;
    let deposit_schedule = if exceeds_threshold {
        DepositSchedule::SemiWeekly
    } else {
        DepositSchedule::Monthly
    };

    // Prior year's classification; accounts without one default to monthly
    let previous_deposit_schedule = LookbackPeriod::find()
        .filter(lookback_period::Column::AccountId.eq(account_id))
        .filter(lookback_period::Column::LookbackYear.eq(lookback_year - 1))
        .one(db)
        .await?
        .map_or(DepositSchedule::Monthly, |p| p.deposit_schedule);

    let schedule_changed = deposit_schedule != previous_deposit_schedule;
    let today = Utc::now().date_naive();

    let txn = db.begin().await?;

    let existing = LookbackPeriod::find()
        .filter(lookback_period::Column::AccountId.eq(account_id))
        .filter(lookback_period::Column::LookbackYear.eq(lookback_year))
        .one(&txn)
        .await?;

    // The history append is gated on the *stored* row, not the recomputed
    // flag: a rerun that lands on the same schedule appends nothing
    let append_history = schedule_changed
        && existing
            .as_ref()
            .is_none_or(|row| row.deposit_schedule != deposit_schedule);

    let schedule_change_date = if schedule_changed {
        existing
            .as_ref()
            .filter(|row| row.deposit_schedule == deposit_schedule)
            .and_then(|row| row.schedule_change_date)
            .or(Some(today))
    } else {
        None
    };

    let mut active: lookback_period::ActiveModel = match existing {
        Some(row) => row.into(),
        None => lookback_period::ActiveModel {
            account_id: Set(account_id.to_string()),
            lookback_year: Set(lookback_year),
            ..Default::default()
        },
    };
    active.window_start = Set(window_start);
    active.window_end = Set(window_end);
    active.q3_prior_year = Set(liabilities[0]);
    active.q4_prior_year = Set(liabilities[1]);
    active.q1_current_year = Set(liabilities[2]);
    active.q2_current_year = Set(liabilities[3]);
    active.total_liability = Set(total_liability);
    active.threshold_amount = Set(LOOKBACK_THRESHOLD);
    active.exceeds_threshold = Set(exceeds_threshold);
    active.deposit_schedule = Set(deposit_schedule);
    active.previous_deposit_schedule = Set(previous_deposit_schedule);
    active.schedule_changed = Set(schedule_changed);
    active.schedule_change_date = Set(schedule_change_date);

    let period = active.save(&txn).await?.try_into_model()?;

    if append_history {
        let history = deposit_schedule_history::ActiveModel {
            account_id: Set(account_id.to_string()),
            lookback_period_id: Set(period.id),
            old_schedule: Set(previous_deposit_schedule),
            new_schedule: Set(deposit_schedule),
            effective_date: Set(today),
            trigger_liability: Set(total_liability),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        history.insert(&txn).await?;

        tracing::info!(
            account_id,
            lookback_year,
            old = previous_deposit_schedule.label(),
            new = deposit_schedule.label(),
            "deposit schedule changed"
        );
    }

    txn.commit().await?;

    let message = build_message(&period);
    let warning = build_warning(&missing);

    Ok(LookbackOutcome {
        period,
        message,
        warning,
    })
}

/// Returns the history rows recorded for an account, newest first.
pub async fn get_schedule_history(
    db: &DatabaseConnection,
    account_id: &str,
) -> Result<Vec<deposit_schedule_history::Model>> {
    ScheduleHistory::find()
        .filter(deposit_schedule_history::Column::AccountId.eq(account_id))
        .order_by_desc(deposit_schedule_history::Column::EffectiveDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The filed liability for one quarter, or `None` when no return is stored.
async fn filed_liability(
    db: &DatabaseConnection,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
) -> Result<Option<Decimal>> {
    Ok(Filing::find()
        .filter(form941_filing::Column::AccountId.eq(account_id))
        .filter(form941_filing::Column::TaxYear.eq(tax_year))
        .filter(form941_filing::Column::Quarter.eq(quarter))
        .one(db)
        .await?
        .map(|f| f.total_taxes_after_adjustments))
}

fn build_message(period: &lookback_period::Model) -> String {
    let total = period.total_liability.round_dp(2);
    let threshold = period.threshold_amount.round_dp(2);
    if period.exceeds_threshold {
        format!(
            "Lookback liability ${total:.2} exceeds ${threshold:.2}; \
             deposit schedule is semi-weekly"
        )
    } else {
        format!(
            "Lookback liability ${total:.2} is at or below ${threshold:.2}; \
             deposit schedule is monthly"
        )
    }
}

fn build_warning(missing: &[String]) -> Option<String> {
    if missing.is_empty() {
        None
    } else {
        Some(format!(
            "No filed return for {}; missing quarters counted as zero liability",
            missing.join(", ")
        ))
    }
}
