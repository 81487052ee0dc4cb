use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};

use crate::models::{ApiError, ApiResult, UploadReportResponse};
use crate::AppState;

/// POST /api/upload — accept a multipart `file` field and store it in the
/// report bucket under a timestamp-prefixed key.
pub async fn upload_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadReportResponse>> {
    let mut filename = String::new();
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        filename = field.file_name().unwrap_or_default().to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
            .to_vec();

        file_data = Some(data);
        break;
    }

    let data = file_data.ok_or(ApiError::BadRequest("No file part in the request".to_string()))?;
    if filename.is_empty() {
        return Err(ApiError::BadRequest("No file selected".to_string()));
    }
    if data.is_empty() {
        return Err(ApiError::BadRequest("Empty file provided".to_string()));
    }

    let report_key = report_key_for(&filename, Utc::now());

    tracing::info!(
        "Uploading report '{}' ({} bytes) as '{}'",
        filename,
        data.len(),
        report_key
    );
    state.s3.upload_report(&report_key, data).await?;

    Ok(Json(UploadReportResponse {
        success: true,
        message: format!("Successfully uploaded file: {}", report_key),
        report_key,
    }))
}

/// Key generation: ingestion timestamp prefix plus the original filename.
/// Two uploads of the same filename within the same second collide and the
/// second overwrites the first; that is accepted, documented behavior.
fn report_key_for(filename: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}", now.format("%Y%m%d_%H%M%S"), filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_key_format() {
        let now: DateTime<Utc> = "2024-01-01T12:34:56Z".parse().unwrap();
        assert_eq!(
            report_key_for("sales_report_1.csv", now),
            "20240101_123456_sales_report_1.csv"
        );
    }

    #[test]
    fn test_same_second_uploads_collide() {
        let now: DateTime<Utc> = "2024-01-01T12:34:56Z".parse().unwrap();
        assert_eq!(
            report_key_for("sales.csv", now),
            report_key_for("sales.csv", now)
        );
    }
}
