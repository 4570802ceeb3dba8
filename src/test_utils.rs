//! Shared test utilities for the deposit compliance engine.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults, plus in-memory payroll
//! data source fakes for exercising the Schedule B generator.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, Set, prelude::*};

use crate::{
    core::{calendar, deposit, filing},
    entities::{self, DepositStatus},
    errors::{Error, Result},
    payroll::{PayrollDataSource, PayrollRecord},
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an empty draft filing for the quarter.
pub async fn create_test_filing(
    db: &DatabaseConnection,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
) -> Result<entities::form941_filing::Model> {
    filing::create_filing(db, account_id, tax_year, quarter).await
}

/// Creates a filing for the quarter carrying a filed liability total.
///
/// Used to seed the trailing quarters the lookback classifier reads.
pub async fn seed_filing_with_liability(
    db: &DatabaseConnection,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
    liability: Decimal,
) -> Result<entities::form941_filing::Model> {
    let row = filing::create_filing(db, account_id, tax_year, quarter).await?;

    let mut active: entities::form941_filing::ActiveModel = row.into();
    active.total_taxes_after_adjustments = Set(liability);
    active.update(db).await.map_err(Into::into)
}

/// Records a deposit with sensible defaults.
///
/// # Defaults
/// * `deposit_date`: the first day of the quarter
/// * `reference`: None
pub async fn create_test_deposit(
    db: &DatabaseConnection,
    account_id: &str,
    tax_year: i32,
    quarter: i32,
    amount: Decimal,
    status: DepositStatus,
) -> Result<entities::deposit::Model> {
    let (quarter_start, _) = calendar::quarter_bounds(tax_year, quarter)?;
    deposit::record_deposit(
        db,
        account_id,
        tax_year,
        quarter,
        quarter_start,
        amount,
        status,
        None,
    )
    .await
}

/// Builds a payroll record from the test's withholding figures.
///
/// # Defaults
/// * `source`: `"test-payroll"`
pub fn payroll_record(
    payroll_date: NaiveDate,
    federal_income_tax: Decimal,
    social_security_withholding: Decimal,
    medicare_withholding: Decimal,
) -> PayrollRecord {
    PayrollRecord {
        payroll_date,
        federal_income_tax,
        social_security_withholding,
        medicare_withholding,
        source: "test-payroll".to_string(),
    }
}

/// In-memory payroll data source serving a fixed record set.
#[derive(Debug, Clone)]
pub struct StaticPayrollSource {
    active: bool,
    records: Vec<PayrollRecord>,
}

impl StaticPayrollSource {
    /// An active connection serving `records`.
    pub fn new(records: Vec<PayrollRecord>) -> Self {
        Self {
            active: true,
            records,
        }
    }

    /// A connection the provider reports as disconnected.
    pub fn inactive() -> Self {
        Self {
            active: false,
            records: Vec::new(),
        }
    }
}

#[async_trait]
impl PayrollDataSource for StaticPayrollSource {
    async fn is_active(&self, _account_id: &str) -> Result<bool> {
        Ok(self.active)
    }

    async fn records_in_range(
        &self,
        _account_id: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<PayrollRecord>> {
        // Serves the whole fixture regardless of range, mimicking a sloppy
        // provider; the generator is expected to filter
        Ok(self.records.clone())
    }
}

/// Payroll data source whose record fetch always fails, for exercising the
/// retryable upstream-failure path.
#[derive(Debug, Clone, Copy)]
pub struct FailingPayrollSource;

#[async_trait]
impl PayrollDataSource for FailingPayrollSource {
    async fn is_active(&self, _account_id: &str) -> Result<bool> {
        Ok(true)
    }

    async fn records_in_range(
        &self,
        _account_id: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<PayrollRecord>> {
        Err(Error::PayrollSource {
            message: "simulated provider outage".to_string(),
        })
    }
}
