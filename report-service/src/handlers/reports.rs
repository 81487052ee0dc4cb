use axum::{extract::State, Json};

use crate::models::{ApiResult, ListReportsResponse};
use crate::AppState;

/// GET /api/reports — list every report in the bucket.
pub async fn list_reports(State(state): State<AppState>) -> ApiResult<Json<ListReportsResponse>> {
    let reports = state.s3.list_reports().await?;

    tracing::debug!("Listing {} reports", reports.len());
    Ok(Json(ListReportsResponse {
        success: true,
        reports,
    }))
}
