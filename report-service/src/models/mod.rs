pub mod error;

pub use error::{ApiError, ApiResult};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A report blob stored in the bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportObject {
    pub key: String,
    pub size: i64,
    pub last_modified: DateTime<Utc>,
}

/// One raw CSV row of a sales report. Field names double as the required
/// header columns; a row missing any of them fails deserialization.
/// `price` deserializes from the raw field text so its fixed-point scale
/// survives; the default Decimal path would go through csv's f64 inference
/// and turn "10.00" into 10.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SalesRecord {
    pub order_id: String,
    pub product_id: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub order_date: String,
}

/// A sales record after transformation, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSale {
    pub order_id: String,
    pub product_id: String,
    pub quantity: i32,
    pub price: Decimal,
    pub total_amount: Decimal,
    pub order_date: String,
    pub process_date: NaiveDate,
}

/// Aggregate statistics over all processed sales.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct SalesStatistics {
    pub total_orders: i64,
    pub total_sales: Decimal,
    pub average_order_value: Decimal,
    pub max_order_value: Decimal,
    pub min_order_value: Decimal,
}

/// Request body for POST /api/process
#[derive(Debug, Deserialize)]
pub struct ProcessReportRequest {
    pub report_key: String,
}

/// Response for GET /api/reports
#[derive(Debug, Serialize)]
pub struct ListReportsResponse {
    pub success: bool,
    pub reports: Vec<ReportObject>,
}

/// Response for POST /api/upload
#[derive(Debug, Serialize)]
pub struct UploadReportResponse {
    pub success: bool,
    pub message: String,
    pub report_key: String,
}

/// Response for POST /api/process
#[derive(Debug, Serialize)]
pub struct ProcessReportResponse {
    pub success: bool,
    pub message: String,
    pub rows_processed: usize,
}

/// Response for GET /api/stats. Exactly one of `statistics` or `message`
/// is present: `message` carries the empty-state advisory.
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<SalesStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatisticsResponse {
    pub fn with_statistics(statistics: SalesStatistics) -> Self {
        Self {
            success: true,
            statistics: Some(statistics),
            message: None,
        }
    }

    pub fn empty_state() -> Self {
        Self {
            success: true,
            statistics: None,
            message: Some("No data has been processed yet".to_string()),
        }
    }
}
