use axum::Json;
use serde_json::{json, Value};

use crate::response::ApiResponse;

/// Liveness endpoint; does not touch the database
pub async fn health() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::data(json!({
        "status": "ok",
        "version": gymdesk_shared::VERSION,
    })))
}
