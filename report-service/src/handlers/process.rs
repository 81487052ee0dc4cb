use axum::{extract::State, Json};
use chrono::Utc;

use crate::db::repository;
use crate::models::{ApiError, ApiResult, ProcessReportRequest, ProcessReportResponse};
use crate::processing;
use crate::AppState;

/// POST /api/process — ingest a stored report: fetch from the bucket, parse
/// the CSV, transform each row, and persist the batch with provenance.
pub async fn process_report(
    State(state): State<AppState>,
    payload: Option<Json<ProcessReportRequest>>,
) -> ApiResult<Json<ProcessReportResponse>> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::BadRequest("Report key is required".to_string()));
    };
    if request.report_key.is_empty() {
        return Err(ApiError::BadRequest("Report key is required".to_string()));
    }
    let report_key = request.report_key;

    tracing::info!("Processing report '{}'", report_key);

    let data = state.s3.download_report(&report_key).await?;
    let sales = processing::parse_report(&data, Utc::now().date_naive())?;

    repository::ensure_schema(&state.db_pool).await?;
    repository::insert_processed_sales(&state.db_pool, &report_key, &sales).await?;

    Ok(Json(ProcessReportResponse {
        success: true,
        message: format!("Successfully processed report: {}", report_key),
        rows_processed: sales.len(),
    }))
}
