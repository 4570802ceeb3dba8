//! Payroll data source abstraction.
//!
//! The Schedule B generator consumes payroll-date-level withholding records
//! from an external payroll provider. That provider is reached through this
//! trait so the generator stays independent of any specific sync product and
//! can be unit-tested against an in-memory fake.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;

/// One payroll event's withholding totals, as reported by the provider.
///
/// The Social Security and Medicare figures are the *employee* withholding;
/// the engine doubles them to account for the matching employer share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollRecord {
    /// Date wages were paid
    pub payroll_date: NaiveDate,
    /// Federal income tax withheld
    pub federal_income_tax: Decimal,
    /// Employee Social Security withholding
    pub social_security_withholding: Decimal,
    /// Employee Medicare withholding
    pub medicare_withholding: Decimal,
    /// Provider identifier for audit trails (e.g. `"gusto"`)
    pub source: String,
}

/// Collaborator interface over the external payroll-sync provider.
///
/// Implementations are expected to be I/O-bound; callers bound each call
/// with a timeout and treat failures as retryable.
#[async_trait]
pub trait PayrollDataSource: Send + Sync {
    /// Whether the account has an active payroll connection. Generation is
    /// refused outright when it does not.
    async fn is_active(&self, account_id: &str) -> Result<bool>;

    /// Payroll records for the account with payroll dates inside
    /// `[start, end]`, inclusive.
    async fn records_in_range(
        &self,
        account_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PayrollRecord>>;
}
