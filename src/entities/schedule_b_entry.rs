//! Schedule B entry entity - per-payroll-date deposit liability.
//!
//! One row per payroll event inside a quarter, created by the Schedule B
//! generator and never mutated. Rerunning the generator replaces the filing's
//! entries wholesale.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Schedule B entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedule_b_entries")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    /// The Form 941 filing this entry belongs to
    pub filing_id: i64,
    /// Date wages were paid
    pub payroll_date: Date,
    /// Date the tax liability was incurred (the payroll date)
    pub tax_liability_date: Date,
    /// Semi-weekly deposit due date derived from the payroll date's weekday
    pub deposit_due_date: Date,
    /// Total deposit obligation for this payroll date
    pub tax_liability: Decimal,
    /// Federal income tax withheld
    pub federal_income_tax: Decimal,
    /// Combined employer and employee Social Security tax
    pub social_security_tax: Decimal,
    /// Combined employer and employee Medicare tax
    pub medicare_tax: Decimal,
    /// Payroll provider the record was synced from
    pub source: String,
    /// When this entry was generated
    pub created_at: DateTime,
}

/// Each entry belongs to one Form 941 filing
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The owning filing
    #[sea_orm(
        belongs_to = "super::form941_filing::Entity",
        from = "Column::FilingId",
        to = "super::form941_filing::Column::Id"
    )]
    Filing,
}

impl Related<super::form941_filing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Filing.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
