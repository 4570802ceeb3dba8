//! Form 941 filing entity - the aggregate quarterly return.
//!
//! Created in draft by payroll sync or manual entry, mutated by
//! recalculation and by the validator, immutable once submitted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::deposit_schedule::DepositSchedule;

/// Filing lifecycle state. Submitted filings refuse every mutation.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Editable working copy
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Handed to the filing transport; frozen
    #[sea_orm(string_value = "submitted")]
    Submitted,
}

/// Form 941 filing database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form941_filings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    /// Legal business name as it appears on the return
    pub business_name: Option<String>,
    /// Employer Identification Number, formatted `NN-NNNNNNN`
    pub ein: Option<String>,
    /// Tax year of the return
    pub tax_year: i32,
    /// Quarter of the return (1-4)
    pub quarter: i32,
    /// Number of employees paid in the quarter
    pub employee_count: Option<i32>,
    /// Line 2: total wages, tips, and other compensation
    pub wages_tips_compensation: Decimal,
    /// Line 3: federal income tax withheld
    pub federal_income_tax_withheld: Decimal,
    /// Line 5a: wages subject to Social Security tax
    pub taxable_social_security_wages: Decimal,
    /// Line 5c: wages subject to Medicare tax
    pub taxable_medicare_wages: Decimal,
    /// Social Security tax, employer and employee shares combined
    pub social_security_tax: Decimal,
    /// Medicare tax, employer and employee shares combined
    pub medicare_tax: Decimal,
    /// Total taxes after adjustments - the quarter's liability
    pub total_taxes_after_adjustments: Decimal,
    /// Liability incurred in the first month of the quarter
    pub month1_liability: Decimal,
    /// Liability incurred in the second month of the quarter
    pub month2_liability: Decimal,
    /// Liability incurred in the third month of the quarter
    pub month3_liability: Decimal,
    /// Total deposits made for the quarter
    pub total_deposits: Decimal,
    /// Remaining balance due with the return
    pub balance_due: Decimal,
    /// Deposit schedule in force for this quarter, when classified
    pub deposit_schedule: Option<DepositSchedule>,
    /// Lifecycle state
    pub status: FilingStatus,
    /// Outcome of the last validation run, when one has run
    pub validation_passed: Option<bool>,
    /// Blocking errors from the last validation run (JSON array)
    pub validation_errors: Option<Json>,
    /// Advisory warnings from the last validation run (JSON array)
    pub validation_warnings: Option<Json>,
    /// When the filing was created
    pub created_at: DateTime,
    /// When the filing was last mutated
    pub updated_at: DateTime,
}

/// One filing has many Schedule B entries
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Per-payroll-date liability entries for semi-weekly depositors
    #[sea_orm(has_many = "super::schedule_b_entry::Entity")]
    ScheduleBEntries,
}

impl Related<super::schedule_b_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleBEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
