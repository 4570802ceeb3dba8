//! Deposit ledger business logic.
//!
//! Records federal tax deposits and serves the quarter-scoped views the safe
//! harbor tracker and filing recalculation consume. Recording is idempotent
//! on the external confirmation reference, so a payment provider replaying a
//! webhook never produces a duplicate ledger row.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

use crate::{
    core::calendar,
    entities::{Deposit, DepositStatus, deposit},
    errors::{Error, Result},
};

/// Records a deposit toward a quarter's liability.
///
/// When `reference` matches an existing deposit for the account, the stored
/// row is returned unchanged instead of inserting a duplicate.
pub async fn record_deposit(
    db: &DatabaseConnection,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
    deposit_date: NaiveDate,
    amount: Decimal,
    status: DepositStatus,
    reference: Option<String>,
) -> Result<deposit::Model> {
    if account_id.trim().is_empty() {
        return Err(Error::InvalidRequest {
            message: "account id cannot be blank".to_string(),
        });
    }
    calendar::quarter_bounds(tax_year, quarter)?;
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }

    if let Some(ref external_ref) = reference {
        let existing = Deposit::find()
            .filter(deposit::Column::AccountId.eq(account_id))
            .filter(deposit::Column::Reference.eq(external_ref.as_str()))
            .one(db)
            .await?;
        if let Some(row) = existing {
            return Ok(row);
        }
    }

    let model = deposit::ActiveModel {
        account_id: Set(account_id.to_string()),
        tax_year: Set(tax_year),
        quarter: Set(quarter),
        deposit_date: Set(deposit_date),
        amount: Set(amount),
        status: Set(status),
        reference: Set(reference),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Deposits that count toward a quarter's totals: pending and completed,
/// never canceled. Ordered by deposit date.
pub async fn get_deposits_for_quarter(
    db: &DatabaseConnection,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
) -> Result<Vec<deposit::Model>> {
    Deposit::find()
        .filter(deposit::Column::AccountId.eq(account_id))
        .filter(deposit::Column::TaxYear.eq(tax_year))
        .filter(deposit::Column::Quarter.eq(quarter))
        .filter(deposit::Column::Status.is_in([DepositStatus::Pending, DepositStatus::Completed]))
        .order_by_asc(deposit::Column::DepositDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a pending deposit as settled.
pub async fn mark_deposit_completed(
    db: &DatabaseConnection,
    deposit_id: i64,
) -> Result<deposit::Model> {
    set_status(db, deposit_id, DepositStatus::Completed).await
}

/// Cancels a deposit, removing it from every total.
pub async fn cancel_deposit(db: &DatabaseConnection, deposit_id: i64) -> Result<deposit::Model> {
    set_status(db, deposit_id, DepositStatus::Canceled).await
}

async fn set_status(
    db: &DatabaseConnection,
    deposit_id: i64,
    status: DepositStatus,
) -> Result<deposit::Model> {
    let row = Deposit::find_by_id(deposit_id)
        .one(db)
        .await?
        .ok_or(Error::DepositNotFound { deposit_id })?;

    let mut active: deposit::ActiveModel = row.into();
    active.status = Set(status);
    active.update(db).await.map_err(Into::into)
}
