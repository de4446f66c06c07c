pub mod error;
pub mod traits;
pub mod types;

pub use error::ExtractError;
pub use traits::{AgentRequest, AgentRunner, DocumentStore};
pub use types::{
    AadhaarBack, AadhaarFront, DocumentType, ExtractedFields, ExtractionRecord, NewExtraction,
    PanCardFields, PassportPage1, PassportPage2, RecordFilter, UnknownDocumentType,
};
