//! Safe harbor tracking entity - per-quarter deposit sufficiency.
//!
//! One row per (account, tax year, quarter), recomputed whenever deposits or
//! liability change for that quarter.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Safe harbor tracking database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "safe_harbor_tracking")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    /// Tax year being tracked
    pub tax_year: i32,
    /// Quarter being tracked (1-4)
    pub quarter: i32,
    /// First day of the quarter
    pub quarter_start: Date,
    /// Last day of the quarter
    pub quarter_end: Date,
    /// The quarter's total tax liability
    pub total_liability: Decimal,
    /// 100% safe-harbor threshold (equals the liability)
    pub safe_harbor_100: Decimal,
    /// 90% safe-harbor threshold, kept at full precision
    pub safe_harbor_90: Decimal,
    /// Sum of pending and completed deposits for the quarter
    pub total_deposits: Decimal,
    /// Number of deposits counted
    pub deposit_count: i32,
    /// Whether deposits reach the full liability
    pub meets_100: bool,
    /// Whether deposits reach the 90% threshold
    pub meets_90: bool,
    /// Amount still owed to reach the 90% threshold (zero when met)
    pub shortfall: Decimal,
    /// Suggested catch-up deposit, equal to the shortfall
    pub recommended_catch_up: Decimal,
    /// Deadline for the catch-up deposit - the quarter's end
    pub catch_up_due_date: Date,
}

/// Safe harbor tracking has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
