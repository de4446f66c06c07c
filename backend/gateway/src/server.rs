//! Router assembly and server startup for the DocLens gateway.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use doclens_core::{AgentRunner, DocumentStore};

use crate::{extract, health, query};

/// Upload cap: generous for phone-camera document photos plus multipart
/// overhead.
const MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;

/// Which mode the server runs in; gates error detail in 500 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Anything other than "production" is treated as development.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Application state shared across routes.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<dyn AgentRunner>,
    pub store: Arc<dyn DocumentStore>,
    pub environment: Environment,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(health::banner))
        .route(
            "/api/extract/passport/{page_number}",
            post(extract::extract_passport),
        )
        .route(
            "/api/extract/aadhaar/{page_number}",
            post(extract::extract_aadhaar),
        )
        .route("/api/extract/pan-card", post(extract::extract_pan_card))
        .route("/api/extracted-data", get(query::list_extractions))
        .route("/api/extracted-data/{id}", get(query::get_extraction))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// CORS layer allowing only the configured origins.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Unknown routes return a 404 naming the attempted method and path.
async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": format!("route not found: {} {}", method, uri.path()),
        })),
    )
}

/// Start the gateway HTTP server.
pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
    allowed_origins: &[String],
) -> Result<()> {
    let app = build_router(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http());

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
