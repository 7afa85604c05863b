use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::store::ReportingStore;

/// Health check endpoint handler
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "retail-reports-rs",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness endpoint handler; fails when the database is unreachable
pub async fn ready(State(store): State<Arc<dyn ReportingStore>>) -> (StatusCode, Json<Value>) {
    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ready" })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "not_ready", "error": e.to_string() })),
            )
        }
    }
}
