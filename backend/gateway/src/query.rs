//! Query endpoints over previously persisted extraction records.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use doclens_core::{DocumentType, ExtractError, RecordFilter};

use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub document_type: Option<DocumentType>,
    pub page_number: Option<u32>,
}

/// Handler for `GET /api/extracted-data`. Filters are optional and
/// conjunctive; records come back newest first.
pub async fn list_extractions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let records = state
        .store
        .list(RecordFilter {
            document_type: params.document_type,
            page_number: params.page_number,
        })
        .await
        .map_err(|e| ApiError::new(e, state.environment))?;

    Ok(Json(json!({
        "success": true,
        "count": records.len(),
        "records": records,
    })))
}

/// Handler for `GET /api/extracted-data/{id}`. An unknown or unparseable
/// id is a not-found client error, never a server error.
pub async fn get_extraction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let environment = state.environment;
    let not_found = || ApiError::new(ExtractError::RecordNotFound(id.clone()), environment);

    let uuid = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let record = state
        .store
        .get(uuid)
        .await
        .map_err(|e| ApiError::new(e, environment))?
        .ok_or_else(not_found)?;

    Ok(Json(json!({ "success": true, "record": record })))
}
