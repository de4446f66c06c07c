//! DocLens Gateway HTTP API Server
//!
//! Provides the extraction endpoints, the query endpoints over persisted
//! records, health/banner routes, CORS, and error-to-response mapping.

pub mod error;
pub mod extract;
pub mod health;
pub mod query;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, cors_layer, start_server, AppState, Environment};
