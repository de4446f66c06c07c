use thiserror::Error;

use crate::types::DocumentType;

/// Top-level error type for the DocLens extraction backend.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no image file uploaded")]
    MissingImage,

    #[error("missing or invalid page number: {0:?}")]
    InvalidPage(String),

    #[error("invalid page number {page} for {document_type}")]
    UnsupportedPage {
        document_type: DocumentType,
        page: u32,
    },

    #[error("no extraction record found for id {0:?}")]
    RecordNotFound(String),

    #[error("extraction agent failed: {0}")]
    Agent(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExtractError {
    /// Whether this error is an expected client input mistake (4xx) rather
    /// than a dependency or internal failure (5xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingImage
                | Self::InvalidPage(_)
                | Self::UnsupportedPage { .. }
                | Self::RecordNotFound(_)
        )
    }
}
