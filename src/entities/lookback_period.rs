//! Lookback period entity - the 12-month classification window.
//!
//! One row per (account, lookback year), overwritten whenever the lookback
//! calculation is rerun. The stored row always satisfies
//! `total_liability == q3 + q4 + q1 + q2` and
//! `deposit_schedule == SemiWeekly` exactly when the total exceeds the
//! threshold.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::deposit_schedule::DepositSchedule;

/// Lookback period database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lookback_periods")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account; rows are never shared across accounts
    pub account_id: String,
    /// The deposit year this classification applies to
    pub lookback_year: i32,
    /// July 1 of the prior year
    pub window_start: Date,
    /// June 30 of the lookback year
    pub window_end: Date,
    /// Filed liability for Q3 of the prior year (zero when unfiled)
    pub q3_prior_year: Decimal,
    /// Filed liability for Q4 of the prior year (zero when unfiled)
    pub q4_prior_year: Decimal,
    /// Filed liability for Q1 of the lookback year (zero when unfiled)
    pub q1_current_year: Decimal,
    /// Filed liability for Q2 of the lookback year (zero when unfiled)
    pub q2_current_year: Decimal,
    /// Sum of the four quarterly liabilities
    pub total_liability: Decimal,
    /// The classification threshold, 50,000
    pub threshold_amount: Decimal,
    /// Whether `total_liability` exceeds the threshold
    pub exceeds_threshold: bool,
    /// Classification derived from the threshold test
    pub deposit_schedule: DepositSchedule,
    /// The prior lookback year's classification (Monthly when none stored)
    pub previous_deposit_schedule: DepositSchedule,
    /// Whether the classification changed versus the prior year
    pub schedule_changed: bool,
    /// Date the change took effect, when one was detected
    pub schedule_change_date: Option<Date>,
}

/// One lookback period may trigger schedule-history rows
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Schedule changes recorded against this lookback period
    #[sea_orm(has_many = "super::deposit_schedule_history::Entity")]
    ScheduleHistory,
}

impl Related<super::deposit_schedule_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
