//! Operation boundaries for the compliance engine.
//!
//! Each submodule pairs a serde-shaped request/response with an async
//! handler that delegates to the core calculators. The caller supplies the
//! authenticated account context; these handlers assume it has already been
//! established.

/// Lookback classification operation
pub mod lookback;
/// Safe-harbor tracking operation
pub mod safe_harbor;
/// Schedule B generation operation
pub mod schedule_b;
/// Filing validation operation
pub mod validation;
