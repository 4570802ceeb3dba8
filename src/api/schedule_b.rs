//! `GenerateScheduleB` operation boundary.

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    config::engine::EngineSettings,
    core,
    entities::schedule_b_entry,
    errors::Result,
    payroll::PayrollDataSource,
};

/// Request to generate a quarter's Schedule B entries.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateScheduleBRequest {
    /// Account to generate for
    pub account_id: String,
    /// Tax year of the quarter
    pub tax_year: i32,
    /// Quarter (1-4)
    pub quarter: i32,
    /// The filing the entries belong to
    pub filing_id: i64,
}

/// Generation result.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateScheduleBResponse {
    /// Stored entries in payroll-date order (empty for monthly depositors)
    pub entries: Vec<schedule_b_entry::Model>,
    /// Number of entries stored
    pub count: usize,
    /// Per-month aggregation, present for monthly depositors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_totals: Option<[Decimal; 3]>,
    /// Generation summary
    pub message: String,
}

/// Generates Schedule B entries through the injected payroll data source.
#[instrument(skip(db, source, settings))]
pub async fn generate_schedule_b(
    db: &DatabaseConnection,
    source: &dyn PayrollDataSource,
    settings: &EngineSettings,
    request: GenerateScheduleBRequest,
) -> Result<GenerateScheduleBResponse> {
    let outcome = core::schedule_b::generate_schedule_b(
        db,
        source,
        settings,
        &request.account_id,
        request.tax_year,
        request.quarter,
        request.filing_id,
    )
    .await?;

    info!(
        account_id = %request.account_id,
        filing_id = request.filing_id,
        count = outcome.count,
        "schedule B generated"
    );

    Ok(GenerateScheduleBResponse {
        entries: outcome.entries,
        count: outcome.count,
        monthly_totals: outcome.monthly_totals,
        message: outcome.message,
    })
}
