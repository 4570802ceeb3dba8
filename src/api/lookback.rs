//! `ComputeLookback` operation boundary.

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{core, entities::lookback_period, errors::Result};

/// Request to classify an account's deposit schedule for a year.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputeLookbackRequest {
    /// Account to classify
    pub account_id: String,
    /// Deposit year the classification applies to
    pub lookback_year: i32,
}

/// Classification result.
#[derive(Debug, Clone, Serialize)]
pub struct ComputeLookbackResponse {
    /// The stored lookback period
    pub lookback: lookback_period::Model,
    /// Classification summary
    pub message: String,
    /// Present when trailing quarters had no filed return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Runs the lookback classification and persists the result.
#[instrument(skip(db))]
pub async fn compute_lookback(
    db: &DatabaseConnection,
    request: ComputeLookbackRequest,
) -> Result<ComputeLookbackResponse> {
    let outcome =
        core::lookback::compute_lookback(db, &request.account_id, request.lookback_year).await?;

    info!(
        account_id = %request.account_id,
        lookback_year = request.lookback_year,
        schedule = outcome.period.deposit_schedule.label(),
        changed = outcome.period.schedule_changed,
        "lookback classification computed"
    );

    Ok(ComputeLookbackResponse {
        lookback: outcome.period,
        message: outcome.message,
        warning: outcome.warning,
    })
}
