//! Engine settings loading from config.toml
//!
//! Tunable compliance parameters live in a TOML file next to the deployment
//! rather than in code: the reconciliation tolerance used by the filing
//! validator and the timeout bounding payroll-sync calls. Every setting has
//! a default so a missing file yields a fully usable configuration.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

/// Absolute tolerance applied when reconciling filed and recomputed currency
/// values, in currency units.
const DEFAULT_RECONCILIATION_TOLERANCE: Decimal = dec!(1.00);

/// Seconds to wait on the payroll data source before surfacing a retryable
/// timeout.
const DEFAULT_PAYROLL_SYNC_TIMEOUT_SECS: u64 = 30;

/// Engine settings parsed from config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    /// Validator tuning
    #[serde(default)]
    pub validation: ValidationSettings,
    /// Payroll-sync tuning
    #[serde(default)]
    pub payroll: PayrollSettings,
}

/// Settings for the filing validator
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationSettings {
    /// Absolute reconciliation tolerance in currency units. Fixed rather
    /// than relative to filing size; see DESIGN.md.
    #[serde(default = "default_tolerance")]
    pub reconciliation_tolerance: Decimal,
}

/// Settings for the payroll data source
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollSettings {
    /// Upper bound on a single payroll-sync call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub sync_timeout_secs: u64,
}

const fn default_tolerance() -> Decimal {
    DEFAULT_RECONCILIATION_TOLERANCE
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_PAYROLL_SYNC_TIMEOUT_SECS
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            reconciliation_tolerance: DEFAULT_RECONCILIATION_TOLERANCE,
        }
    }
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            sync_timeout_secs: DEFAULT_PAYROLL_SYNC_TIMEOUT_SECS,
        }
    }
}

/// Loads engine settings from a TOML file.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed. A
/// missing file is not an error - defaults apply.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<EngineSettings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(EngineSettings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads engine settings from the default location (./config.toml)
pub fn load_default_settings() -> Result<EngineSettings> {
    load_settings("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let settings = EngineSettings::default();
        assert_eq!(
            settings.validation.reconciliation_tolerance,
            dec!(1.00)
        );
        assert_eq!(settings.payroll.sync_timeout_secs, 30);
    }

    #[test]
    fn test_parse_engine_settings() {
        let toml_str = r#"
            [validation]
            reconciliation_tolerance = "0.50"

            [payroll]
            sync_timeout_secs = 10
        "#;

        let settings: EngineSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(
            settings.validation.reconciliation_tolerance,
            dec!(0.50)
        );
        assert_eq!(settings.payroll.sync_timeout_secs, 10);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let toml_str = r#"
            [validation]
            reconciliation_tolerance = "2.00"
        "#;

        let settings: EngineSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(
            settings.validation.reconciliation_tolerance,
            dec!(2.00)
        );
        assert_eq!(settings.payroll.sync_timeout_secs, 30);
    }
}
