//! Deposit schedule history entity - append-only log of schedule changes.
//!
//! Exactly one row is created per detected transition and rows are never
//! mutated afterwards. Reruns of the lookback calculation within the same
//! year must not append duplicates.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::deposit_schedule::DepositSchedule;

/// Schedule change database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deposit_schedule_history")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    /// The lookback period whose classification caused this change
    pub lookback_period_id: i64,
    /// Classification before the change
    pub old_schedule: DepositSchedule,
    /// Classification after the change
    pub new_schedule: DepositSchedule,
    /// Date the new schedule takes effect
    pub effective_date: Date,
    /// The lookback total that triggered the reclassification
    pub trigger_liability: Decimal,
    /// When this row was appended
    pub created_at: DateTime,
}

/// Each history row references the lookback period that caused it
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The triggering lookback period
    #[sea_orm(
        belongs_to = "super::lookback_period::Entity",
        from = "Column::LookbackPeriodId",
        to = "super::lookback_period::Column::Id"
    )]
    LookbackPeriod,
}

impl Related<super::lookback_period::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LookbackPeriod.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
