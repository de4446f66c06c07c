use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ExtractError;
use crate::types::{ExtractionRecord, NewExtraction, RecordFilter};

/// One extraction request handed to the agent runner.
#[derive(Debug, Clone)]
pub struct AgentRequest {
    /// Display name of the agent handling this document type.
    pub agent_name: String,
    /// Name of the output contract (used by providers that label schemas).
    pub contract_name: String,
    /// Natural-language extraction brief for this document page.
    pub instructions: String,
    /// Fixed directive telling the agent to return structured data only.
    pub directive: String,
    /// JSON Schema the agent's response must conform to.
    pub output_contract: serde_json::Value,
    /// The uploaded image as an inline `data:{mime};base64,{..}` URL.
    pub image_data_url: String,
}

/// External collaborator that runs an LLM-based extraction against an image
/// and a structural output contract.
///
/// The returned value is the raw field-value object produced by the agent;
/// callers parse it into a typed shape. No timeout or retry is applied here,
/// so latency and failure behavior are entirely the provider's.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Run one extraction. Failures surface as [`ExtractError::Agent`].
    async fn extract(&self, request: &AgentRequest) -> Result<serde_json::Value, ExtractError>;
}

/// External collaborator providing durable storage and query over
/// [`ExtractionRecord`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new record; the store assigns the id and creation timestamp.
    async fn insert(&self, record: NewExtraction) -> Result<ExtractionRecord, ExtractError>;

    /// List records newest first, applying the given conjunctive filters.
    async fn list(&self, filter: RecordFilter) -> Result<Vec<ExtractionRecord>, ExtractError>;

    /// Fetch one record by id.
    async fn get(&self, id: Uuid) -> Result<Option<ExtractionRecord>, ExtractError>;
}
