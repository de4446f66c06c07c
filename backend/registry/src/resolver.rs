//! Dispatch resolver: maps a (document type, page number) pair to its
//! instructions, output schema, and typed field parser, or rejects the
//! combination. This is the only branching logic in the system; it must
//! reject, never silently default.

use doclens_core::{
    AadhaarBack, AadhaarFront, DocumentType, ExtractError, ExtractedFields, PanCardFields,
    PassportPage1, PassportPage2,
};
use serde_json::Value;

use crate::instructions;
use crate::schema::{self, OutputSchema};

type ParseFn = fn(Value) -> Result<ExtractedFields, serde_json::Error>;

/// One row of the dispatch table: everything the generic extraction handler
/// needs for a supported (document type, page) pair.
#[derive(Debug)]
pub struct DispatchEntry {
    pub document_type: DocumentType,
    pub page: u32,
    /// Display name of the agent handling this document type.
    pub agent_name: &'static str,
    pub instructions: &'static str,
    pub schema: &'static OutputSchema,
    parse: ParseFn,
}

impl DispatchEntry {
    /// Parse the agent's raw field object into the typed shape for this
    /// entry. A mismatch means the agent violated its output contract.
    pub fn parse_fields(&self, value: Value) -> Result<ExtractedFields, ExtractError> {
        (self.parse)(value)
            .map_err(|e| ExtractError::Agent(format!("agent response violated the output contract: {e}")))
    }
}

fn parse_passport_page_1(value: Value) -> Result<ExtractedFields, serde_json::Error> {
    serde_json::from_value::<PassportPage1>(value).map(ExtractedFields::PassportPage1)
}

fn parse_passport_page_2(value: Value) -> Result<ExtractedFields, serde_json::Error> {
    serde_json::from_value::<PassportPage2>(value).map(ExtractedFields::PassportPage2)
}

fn parse_aadhaar_front(value: Value) -> Result<ExtractedFields, serde_json::Error> {
    serde_json::from_value::<AadhaarFront>(value).map(ExtractedFields::AadhaarFront)
}

fn parse_aadhaar_back(value: Value) -> Result<ExtractedFields, serde_json::Error> {
    serde_json::from_value::<AadhaarBack>(value).map(ExtractedFields::AadhaarBack)
}

fn parse_pan_card(value: Value) -> Result<ExtractedFields, serde_json::Error> {
    serde_json::from_value::<PanCardFields>(value).map(ExtractedFields::PanCard)
}

static DISPATCH_TABLE: [DispatchEntry; 5] = [
    DispatchEntry {
        document_type: DocumentType::Passport,
        page: 1,
        agent_name: "Passport Data Extractor",
        instructions: instructions::PASSPORT_PAGE_1,
        schema: &schema::PASSPORT_PAGE_1,
        parse: parse_passport_page_1,
    },
    DispatchEntry {
        document_type: DocumentType::Passport,
        page: 2,
        agent_name: "Passport Data Extractor",
        instructions: instructions::PASSPORT_PAGE_2,
        schema: &schema::PASSPORT_PAGE_2,
        parse: parse_passport_page_2,
    },
    DispatchEntry {
        document_type: DocumentType::Aadhaar,
        page: 1,
        agent_name: "Aadhaar Data Extractor",
        instructions: instructions::AADHAAR_FRONT,
        schema: &schema::AADHAAR_FRONT,
        parse: parse_aadhaar_front,
    },
    DispatchEntry {
        document_type: DocumentType::Aadhaar,
        page: 2,
        agent_name: "Aadhaar Data Extractor",
        instructions: instructions::AADHAAR_BACK,
        schema: &schema::AADHAAR_BACK,
        parse: parse_aadhaar_back,
    },
    DispatchEntry {
        document_type: DocumentType::PanCard,
        page: 1,
        agent_name: "PAN Card Data Extractor",
        instructions: instructions::PAN_CARD,
        schema: &schema::PAN_CARD,
        parse: parse_pan_card,
    },
];

/// Look up the dispatch entry for a (document type, page number) pair.
///
/// Page numbers are 1-based; zero and anything past the type's page count
/// are rejected as [`ExtractError::UnsupportedPage`].
pub fn resolve(document_type: DocumentType, page: u32) -> Result<&'static DispatchEntry, ExtractError> {
    DISPATCH_TABLE
        .iter()
        .find(|entry| entry.document_type == document_type && entry.page == page)
        .ok_or(ExtractError::UnsupportedPage {
            document_type,
            page,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Build a field object satisfying the entry's schema, with dummy values.
    fn sample_fields(schema: &OutputSchema) -> Value {
        let mut map = serde_json::Map::new();
        for name in schema.field_names() {
            map.insert(name.to_string(), json!("sample"));
        }
        Value::Object(map)
    }

    #[test]
    fn every_supported_pair_resolves() {
        for doc in DocumentType::ALL {
            for page in 1..=doc.page_count() {
                let entry = resolve(doc, page).unwrap();
                assert!(!entry.instructions.is_empty());
                assert!(!entry.schema.fields.is_empty());
                assert_eq!(entry.document_type, doc);
                assert_eq!(entry.page, page);
            }
        }
    }

    #[test]
    fn unsupported_pairs_are_rejected() {
        for (doc, page) in [
            (DocumentType::Passport, 0),
            (DocumentType::Passport, 3),
            (DocumentType::Aadhaar, 0),
            (DocumentType::Aadhaar, 3),
            (DocumentType::PanCard, 0),
            (DocumentType::PanCard, 2),
        ] {
            let err = resolve(doc, page).unwrap_err();
            assert!(
                matches!(err, ExtractError::UnsupportedPage { document_type, page: p }
                    if document_type == doc && p == page),
                "expected UnsupportedPage for {doc} page {page}"
            );
        }
    }

    #[test]
    fn schemas_and_typed_shapes_agree() {
        // A schema-conforming object must parse into the typed variant, and
        // serializing it back must reproduce exactly the schema's key set.
        for doc in DocumentType::ALL {
            for page in 1..=doc.page_count() {
                let entry = resolve(doc, page).unwrap();
                let parsed = entry
                    .parse_fields(sample_fields(entry.schema))
                    .unwrap_or_else(|e| panic!("{doc} page {page}: {e}"));

                let round_tripped = parsed.values();
                let keys: Vec<&str> = round_tripped
                    .as_object()
                    .unwrap()
                    .keys()
                    .map(|k| k.as_str())
                    .collect();
                let mut expected = entry.schema.field_names();
                expected.sort_unstable();
                let mut actual = keys.clone();
                actual.sort_unstable();
                assert_eq!(actual, expected, "{doc} page {page}");
            }
        }
    }

    #[test]
    fn contract_violations_surface_as_agent_errors() {
        let entry = resolve(DocumentType::PanCard, 1).unwrap();
        let err = entry
            .parse_fields(json!({ "idNumber": "ABCDE1234F" }))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Agent(_)));
    }
}
