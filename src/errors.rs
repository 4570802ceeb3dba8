//! Unified error types for the deposit compliance engine.
//!
//! Precondition failures (missing input, unknown filing, no payroll
//! connection) are `Err` values and abort the current call before anything is
//! stored. Domain validation outcomes from the filing validator are *not*
//! errors - they are returned as data on the validation report.

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for all engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (bad config.toml, malformed stored value).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Database-layer failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization failure for stored JSON columns.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request field failed validation before any computation ran.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What was wrong with the request
        message: String,
    },

    /// Quarter outside 1-4.
    #[error("Invalid quarter: {quarter} (must be 1-4)")]
    InvalidQuarter {
        /// The rejected quarter value
        quarter: i32,
    },

    /// A currency amount was negative or non-finite where it cannot be.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// No Form 941 filing with the given id.
    #[error("Filing not found: {filing_id}")]
    FilingNotFound {
        /// The missing filing's id
        filing_id: i64,
    },

    /// The filing has been submitted and can no longer be mutated.
    #[error("Filing {filing_id} has been submitted and is immutable")]
    FilingSubmitted {
        /// The submitted filing's id
        filing_id: i64,
    },

    /// No deposit with the given id.
    #[error("Deposit not found: {deposit_id}")]
    DepositNotFound {
        /// The missing deposit's id
        deposit_id: i64,
    },

    /// Schedule B generation requires an active payroll connection.
    #[error("No active payroll connection for account {account_id}")]
    NoPayrollConnection {
        /// The account missing a connection
        account_id: String,
    },

    /// The payroll data source failed mid-call. Retryable.
    #[error("Payroll data source error: {message}")]
    PayrollSource {
        /// Upstream failure description
        message: String,
    },

    /// The payroll data source did not answer within the configured bound.
    /// Retryable.
    #[error("Payroll data source timed out after {seconds}s")]
    PayrollTimeout {
        /// The timeout that elapsed
        seconds: u64,
    },
}

impl Error {
    /// Whether the caller may retry the operation unchanged. Only upstream
    /// payroll-source failures qualify; precondition failures never do.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::PayrollSource { .. } | Self::PayrollTimeout { .. }
        )
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
