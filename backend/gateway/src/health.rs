//! Liveness and service-banner routes.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::server::AppState;

/// Handler for `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
        "environment": state.environment.as_str(),
    }))
}

/// Handler for `GET /` — service banner with the endpoint map.
pub async fn banner() -> Json<Value> {
    Json(json!({
        "message": "DocLens document extraction API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "extractPassport": "POST /api/extract/passport/{pageNumber}",
            "extractAadhaar": "POST /api/extract/aadhaar/{pageNumber}",
            "extractPanCard": "POST /api/extract/pan-card",
            "listExtractions": "GET /api/extracted-data",
            "getExtraction": "GET /api/extracted-data/{id}",
        },
    }))
}
