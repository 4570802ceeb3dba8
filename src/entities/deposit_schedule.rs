//! Deposit schedule classification - the two federal deposit frequencies.
//!
//! Stored as a string column on lookback periods, schedule history, and
//! Form 941 filings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Federal deposit-frequency classification set by the lookback period.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum DepositSchedule {
    /// One deposit per month; lookback liability at or below the threshold
    #[sea_orm(string_value = "monthly")]
    Monthly,
    /// Deposits due within days of each payroll; lookback liability above
    /// the threshold
    #[sea_orm(string_value = "semiweekly")]
    SemiWeekly,
}

impl DepositSchedule {
    /// Human-readable label used in result messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::SemiWeekly => "semi-weekly",
        }
    }
}
