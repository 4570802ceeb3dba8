//! Core business logic - framework-agnostic compliance calculators.
//!
//! Each submodule is a pure function of persisted historical data plus the
//! current request; the shared quarter calendar keeps the date rules in one
//! place.

/// Quarter boundaries, the lookback window, and the semi-weekly due-date rule
pub mod calendar;
/// Deposit ledger operations feeding the safe harbor tracker
pub mod deposit;
/// Form 941 filing lifecycle - creation, recalculation, submission
pub mod filing;
/// Lookback classification and deposit-schedule change detection
pub mod lookback;
/// Safe-harbor threshold tracking per quarter
pub mod safe_harbor;
/// Schedule B entry generation for semi-weekly depositors
pub mod schedule_b;
/// Form 941 pre-submission validation
pub mod validator;
