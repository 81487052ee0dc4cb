use axum::Json;
use serde_json::{json, Value};

/// GET / — service descriptor listing the API endpoints.
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "Sales Report Processing API",
        "status": "running",
        "endpoints": [
            {"path": "/api/reports", "method": "GET", "description": "List available sales reports"},
            {"path": "/api/process", "method": "POST", "description": "Process a specific sales report"},
            {"path": "/api/upload", "method": "POST", "description": "Upload a new sales report"},
            {"path": "/api/stats", "method": "GET", "description": "Get statistics from processed data"}
        ]
    }))
}

pub async fn health_check() -> &'static str {
    "Report Service is healthy"
}
