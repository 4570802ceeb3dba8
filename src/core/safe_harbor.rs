//! Safe harbor tracking business logic.
//!
//! The IRS safe-harbor rule forgives an under-deposit of up to 10% of a
//! quarter's liability provided the shortfall is made up by the catch-up
//! date. This module compares a quarter's pending and completed deposits
//! against the 90% and 100% thresholds and records the result, overwriting
//! the stored row each time deposits or liability change.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, Set, TransactionTrait, TryIntoModel, prelude::*};

use crate::{
    core::{calendar, deposit},
    entities::{SafeHarbor, safe_harbor_tracking},
    errors::{Error, Result},
};

/// Fraction of the quarter's liability that must be on deposit to stay
/// inside the safe harbor.
const SAFE_HARBOR_RATE: Decimal = dec!(0.9);

/// Result of a safe-harbor computation.
#[derive(Debug, Clone)]
pub struct SafeHarborOutcome {
    /// The stored tracking row
    pub tracking: safe_harbor_tracking::Model,
    /// Compliance summary or catch-up instruction
    pub message: String,
}

/// Computes safe-harbor status for one quarter and upserts the tracking row.
///
/// Thresholds are computed at full precision; rounding to two places happens
/// only when amounts are formatted into the outcome message.
pub async fn compute_safe_harbor(
    db: &DatabaseConnection,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
    total_tax_liability: Decimal,
) -> Result<SafeHarborOutcome> {
    if account_id.trim().is_empty() {
        return Err(Error::InvalidRequest {
            message: "account id cannot be blank".to_string(),
        });
    }
    if total_tax_liability < Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: total_tax_liability,
        });
    }

    let (quarter_start, quarter_end) = calendar::quarter_bounds(tax_year, quarter)?;

    let deposits = deposit::get_deposits_for_quarter(db, account_id, tax_year, quarter).await?;
    let total_deposits: Decimal = deposits.iter().map(|d| d.amount).sum();

    // Bounded, request-scoped dataset; a quarter never holds 2^31 deposits
    #[allow(clippy::cast_possible_truncation)]
    let deposit_count = deposits.len() as i32;

    let safe_harbor_100 = total_tax_liability;
    let safe_harbor_90 = total_tax_liability * SAFE_HARBOR_RATE;
    let meets_100 = total_deposits >= safe_harbor_100;
    let meets_90 = total_deposits >= safe_harbor_90;
    let shortfall = (safe_harbor_90 - total_deposits).max(Decimal::ZERO);

    let txn = db.begin().await?;

    let existing = SafeHarbor::find()
        .filter(safe_harbor_tracking::Column::AccountId.eq(account_id))
        .filter(safe_harbor_tracking::Column::TaxYear.eq(tax_year))
        .filter(safe_harbor_tracking::Column::Quarter.eq(quarter))
        .one(&txn)
        .await?;

    let mut active: safe_harbor_tracking::ActiveModel = match existing {
        Some(row) => row.into(),
        None => safe_harbor_tracking::ActiveModel {
            account_id: Set(account_id.to_string()),
            tax_year: Set(tax_year),
            quarter: Set(quarter),
            ..Default::default()
        },
    };
    active.quarter_start = Set(quarter_start);
    active.quarter_end = Set(quarter_end);
    active.total_liability = Set(total_tax_liability);
    active.safe_harbor_100 = Set(safe_harbor_100);
    active.safe_harbor_90 = Set(safe_harbor_90);
    active.total_deposits = Set(total_deposits);
    active.deposit_count = Set(deposit_count);
    active.meets_100 = Set(meets_100);
    active.meets_90 = Set(meets_90);
    active.shortfall = Set(shortfall);
    active.recommended_catch_up = Set(shortfall);
    active.catch_up_due_date = Set(quarter_end);

    let tracking = active.save(&txn).await?.try_into_model()?;

    txn.commit().await?;

    let message = build_message(&tracking);

    Ok(SafeHarborOutcome { tracking, message })
}

fn build_message(tracking: &safe_harbor_tracking::Model) -> String {
    let deposits = tracking.total_deposits.round_dp(2);
    if tracking.meets_90 {
        format!(
            "Deposits of ${deposits:.2} satisfy the 90% safe harbor for {} Q{}",
            tracking.tax_year, tracking.quarter
        )
    } else {
        let shortfall = tracking.shortfall.round_dp(2);
        format!(
            "Deposit ${shortfall:.2} more by {} to reach the 90% safe harbor for {} Q{}",
            tracking.catch_up_due_date.format("%B %-d, %Y"),
            tracking.tax_year,
            tracking.quarter
        )
    }
}
