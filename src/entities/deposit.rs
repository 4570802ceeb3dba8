//! Deposit entity - the federal tax deposit ledger.
//!
//! One row per deposit made toward a quarter's liability. Pending and
//! completed deposits count toward safe-harbor totals; canceled deposits
//! never do.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Deposit settlement state.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    /// Initiated but not yet settled; still counts toward safe harbor
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled with the IRS
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Withdrawn or failed; excluded from all totals
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

/// Deposit database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deposits")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    /// Tax year the deposit applies to
    pub tax_year: i32,
    /// Quarter the deposit applies to (1-4)
    pub quarter: i32,
    /// Date the deposit was made
    pub deposit_date: Date,
    /// Deposit amount
    pub amount: Decimal,
    /// Settlement state
    pub status: DepositStatus,
    /// External confirmation reference (e.g. an EFTPS acknowledgment
    /// number); recording the same reference twice is a no-op
    pub reference: Option<String>,
    /// When this row was recorded
    pub created_at: DateTime,
}

/// Deposits have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
