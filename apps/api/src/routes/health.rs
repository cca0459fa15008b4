use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ats-api"
    }))
}

/// GET /api/test
/// Connectivity probe for the frontend dev proxy.
pub async fn probe_handler() -> Json<Value> {
    Json(json!({ "message": "ATS API is reachable" }))
}
