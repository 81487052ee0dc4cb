use axum::{extract::State, Json};

use crate::db::repository;
use crate::models::{ApiResult, StatisticsResponse};
use crate::AppState;

/// GET /api/stats — aggregate statistics over all processed sales,
/// recomputed on every request. Before any report has been ingested the
/// response carries the empty-state message instead of numbers.
pub async fn get_statistics(State(state): State<AppState>) -> ApiResult<Json<StatisticsResponse>> {
    let response = match repository::fetch_statistics(&state.db_pool).await? {
        Some(statistics) => StatisticsResponse::with_statistics(statistics),
        None => StatisticsResponse::empty_state(),
    };

    Ok(Json(response))
}
