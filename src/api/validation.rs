//! `ValidateFiling` operation boundary.

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{config::engine::EngineSettings, core, errors::Result};

/// Request to validate a filing before submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateFilingRequest {
    /// The filing to validate
    pub filing_id: i64,
}

/// Validation outcome. Errors block submission; warnings are advisory.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateFilingResponse {
    /// True exactly when no errors were found
    pub validation_passed: bool,
    /// Blocking problems
    pub errors: Vec<String>,
    /// Advisory discrepancies
    pub warnings: Vec<String>,
}

/// Runs the validation battery and writes the result onto the filing.
#[instrument(skip(db, settings))]
pub async fn validate_filing(
    db: &DatabaseConnection,
    settings: &EngineSettings,
    request: ValidateFilingRequest,
) -> Result<ValidateFilingResponse> {
    let report = core::validator::validate_filing(
        db,
        request.filing_id,
        settings.validation.reconciliation_tolerance,
    )
    .await?;

    info!(
        filing_id = request.filing_id,
        passed = report.validation_passed,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "filing validated"
    );

    Ok(ValidateFilingResponse {
        validation_passed: report.validation_passed,
        errors: report.errors,
        warnings: report.warnings,
    })
}
