//! `ComputeSafeHarbor` operation boundary.

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{core, entities::safe_harbor_tracking, errors::Result};

/// Request to evaluate a quarter's deposits against the safe harbor.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputeSafeHarborRequest {
    /// Account being tracked
    pub account_id: String,
    /// Tax year of the quarter
    pub tax_year: i32,
    /// Quarter (1-4)
    pub quarter: i32,
    /// The quarter's total tax liability from the filing
    pub total_tax_liability: Decimal,
}

/// Safe-harbor evaluation result.
#[derive(Debug, Clone, Serialize)]
pub struct ComputeSafeHarborResponse {
    /// The stored tracking row
    pub tracking: safe_harbor_tracking::Model,
    /// Compliance summary or catch-up instruction
    pub message: String,
}

/// Evaluates safe-harbor status and persists the tracking row.
#[instrument(skip(db))]
pub async fn compute_safe_harbor(
    db: &DatabaseConnection,
    request: ComputeSafeHarborRequest,
) -> Result<ComputeSafeHarborResponse> {
    let outcome = core::safe_harbor::compute_safe_harbor(
        db,
        &request.account_id,
        request.tax_year,
        request.quarter,
        request.total_tax_liability,
    )
    .await?;

    info!(
        account_id = %request.account_id,
        tax_year = request.tax_year,
        quarter = request.quarter,
        meets_90 = outcome.tracking.meets_90,
        "safe harbor computed"
    );

    Ok(ComputeSafeHarborResponse {
        tracking: outcome.tracking,
        message: outcome.message,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::DepositStatus;
    use crate::test_utils::{create_test_deposit, setup_test_db};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_shortfall_reported_in_message() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_deposit(&db, "acct-sh", 2025, 1, dec!(8500), DepositStatus::Completed)
            .await?;

        let response = compute_safe_harbor(
            &db,
            ComputeSafeHarborRequest {
                account_id: "acct-sh".to_string(),
                tax_year: 2025,
                quarter: 1,
                total_tax_liability: dec!(10000),
            },
        )
        .await?;

        assert!(!response.tracking.meets_90);
        assert_eq!(response.tracking.shortfall, dec!(500));
        assert!(response.message.contains("$500.00"));

        Ok(())
    }
}
