use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of document types accepted by the extraction endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    Passport,
    Aadhaar,
    PanCard,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [Self::Passport, Self::Aadhaar, Self::PanCard];

    /// Number of pages defined for this document type.
    pub fn page_count(&self) -> u32 {
        match self {
            Self::Passport | Self::Aadhaar => 2,
            Self::PanCard => 1,
        }
    }

    /// Route-segment / storage spelling of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::Aadhaar => "aadhaar",
            Self::PanCard => "pan-card",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown document type: {0:?}")]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passport" => Ok(Self::Passport),
            "aadhaar" => Ok(Self::Aadhaar),
            "pan-card" => Ok(Self::PanCard),
            other => Err(UnknownDocumentType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Extracted field shapes, one fixed set per (document type, page)
// ---------------------------------------------------------------------------

/// Passport page 1: the biographical data page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportPage1 {
    pub passport_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub issuing_country: String,
    pub issuing_state: String,
    pub gender: String,
    pub nationality: String,
    pub phone_number: String,
    pub place_of_birth: String,
}

/// Passport page 2: the family and address page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportPage2 {
    pub father_name: String,
    pub mother_name: String,
    pub address: String,
}

/// Aadhaar front side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AadhaarFront {
    pub id_number: String,
    pub name: String,
}

/// Aadhaar back side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AadhaarBack {
    pub address: String,
}

/// PAN card (single page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanCardFields {
    pub id_number: String,
    pub name: String,
}

/// Extracted field-value mapping, tagged by (document type, page).
///
/// Each variant carries the fixed field set for one page shape, so the
/// heterogeneous persisted payloads stay fully typed instead of being an
/// open `serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fields", rename_all = "kebab-case")]
pub enum ExtractedFields {
    PassportPage1(PassportPage1),
    PassportPage2(PassportPage2),
    AadhaarFront(AadhaarFront),
    AadhaarBack(AadhaarBack),
    PanCard(PanCardFields),
}

impl ExtractedFields {
    /// The flat field-value map, without the enum tag.
    pub fn values(&self) -> serde_json::Value {
        let value = match self {
            Self::PassportPage1(f) => serde_json::to_value(f),
            Self::PassportPage2(f) => serde_json::to_value(f),
            Self::AadhaarFront(f) => serde_json::to_value(f),
            Self::AadhaarBack(f) => serde_json::to_value(f),
            Self::PanCard(f) => serde_json::to_value(f),
        };
        // String-only structs always serialize.
        value.unwrap_or(serde_json::Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// A persisted extraction result. Created once per successful agent call,
/// never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRecord {
    /// Store-assigned identifier.
    pub id: Uuid,
    pub document_type: DocumentType,
    pub page_number: u32,
    pub fields: ExtractedFields,
    /// The original upload as an inline `data:` URL.
    pub image_data_url: String,
    pub created_at: DateTime<Utc>,
}

/// Input to [`crate::DocumentStore::insert`]; the store assigns id and
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct NewExtraction {
    pub document_type: DocumentType,
    pub page_number: u32,
    pub fields: ExtractedFields,
    pub image_data_url: String,
}

/// Optional, conjunctive filters for listing extraction records.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFilter {
    pub document_type: Option<DocumentType>,
    pub page_number: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_counts_match_document_types() {
        assert_eq!(DocumentType::Passport.page_count(), 2);
        assert_eq!(DocumentType::Aadhaar.page_count(), 2);
        assert_eq!(DocumentType::PanCard.page_count(), 1);
    }

    #[test]
    fn document_type_round_trips_through_str() {
        for doc in DocumentType::ALL {
            assert_eq!(doc.as_str().parse::<DocumentType>().unwrap(), doc);
        }
        assert!("voter-id".parse::<DocumentType>().is_err());
    }

    #[test]
    fn values_drops_the_enum_tag() {
        let fields = ExtractedFields::PanCard(PanCardFields {
            id_number: "ABCDE1234F".into(),
            name: "Test Person".into(),
        });
        let values = fields.values();
        assert_eq!(values["idNumber"], "ABCDE1234F");
        assert!(values.get("kind").is_none());
    }
}
