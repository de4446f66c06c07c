//! Extraction endpoints.
//!
//! One generic handler runs the full request pipeline:
//! Validate → Dispatch → Invoke Agent → Persist → Respond,
//! strictly sequential, short-circuiting on the first failure. The three
//! routes differ only in the document type (and whether the page number
//! comes from the path).

use axum::extract::{Multipart, Path, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tracing::info;

use doclens_core::{AgentRequest, DocumentType, ExtractError, NewExtraction};
use doclens_registry::{resolve, STRUCTURED_OUTPUT_DIRECTIVE};

use crate::error::ApiError;
use crate::server::AppState;

pub async fn extract_passport(
    State(state): State<AppState>,
    Path(page_number): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    run_extraction(state, DocumentType::Passport, Some(page_number), multipart).await
}

pub async fn extract_aadhaar(
    State(state): State<AppState>,
    Path(page_number): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    run_extraction(state, DocumentType::Aadhaar, Some(page_number), multipart).await
}

pub async fn extract_pan_card(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    run_extraction(state, DocumentType::PanCard, None, multipart).await
}

async fn run_extraction(
    state: AppState,
    document_type: DocumentType,
    page_input: Option<String>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let environment = state.environment;
    let fail = |error: ExtractError| ApiError::new(error, environment);

    // Validate: image payload and page-number syntax.
    let (image_bytes, media_type) = read_image_field(&mut multipart).await.map_err(fail)?;
    let page = match page_input {
        Some(raw) => parse_page(&raw).map_err(fail)?,
        // Single-page document types have no page segment.
        None => 1,
    };

    // Dispatch: reject unsupported (document type, page) combinations.
    let entry = resolve(document_type, page).map_err(fail)?;

    // Invoke agent with the resolved brief, contract, and inline image.
    let image_data_url = to_data_url(&media_type, &image_bytes);
    let request = AgentRequest {
        agent_name: entry.agent_name.to_string(),
        contract_name: entry.schema.name.to_string(),
        instructions: entry.instructions.to_string(),
        directive: STRUCTURED_OUTPUT_DIRECTIVE.to_string(),
        output_contract: entry.schema.json_schema(),
        image_data_url: image_data_url.clone(),
    };
    let raw_fields = state.agent.extract(&request).await.map_err(fail)?;
    let fields = entry.parse_fields(raw_fields).map_err(fail)?;

    // Persist only after a successful agent call.
    let record = state
        .store
        .insert(NewExtraction {
            document_type,
            page_number: page,
            fields,
            image_data_url,
        })
        .await
        .map_err(fail)?;

    info!(id = %record.id, document_type = %document_type, page, "extraction stored");

    Ok(Json(json!({
        "success": true,
        "id": record.id,
        "documentType": record.document_type,
        "pageNumber": record.page_number,
        "data": record.fields.values(),
    })))
}

/// Pull the `image` field out of the multipart body.
async fn read_image_field(multipart: &mut Multipart) -> Result<(Vec<u8>, String), ExtractError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ExtractError::Other(anyhow::anyhow!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let media_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ExtractError::Other(anyhow::anyhow!("failed to read upload: {e}")))?;
        return Ok((bytes.to_vec(), media_type));
    }
    Err(ExtractError::MissingImage)
}

/// Page numbers are 1-based positive integers; zero and non-numeric input
/// are "missing/invalid", distinct from out-of-range (which the resolver
/// reports).
fn parse_page(raw: &str) -> Result<u32, ExtractError> {
    match raw.parse::<u32>() {
        Ok(page) if page > 0 => Ok(page),
        _ => Err(ExtractError::InvalidPage(raw.to_string())),
    }
}

fn to_data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_page_accepts_positive_integers() {
        assert_eq!(parse_page("1").unwrap(), 1);
        assert_eq!(parse_page("2").unwrap(), 2);
    }

    #[test]
    fn parse_page_rejects_zero_and_garbage() {
        for raw in ["0", "-1", "abc", "", "1.5"] {
            assert!(
                matches!(parse_page(raw), Err(ExtractError::InvalidPage(_))),
                "expected InvalidPage for {raw:?}"
            );
        }
    }

    #[test]
    fn data_url_carries_media_type_and_base64_payload() {
        let url = to_data_url("image/png", b"abc");
        assert_eq!(url, "data:image/png;base64,YWJj");
    }
}
