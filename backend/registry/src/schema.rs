//! Output schemas: the authoritative structural contracts handed to the
//! extraction agent, one per (document type, page).

use serde_json::{json, Value};

/// A single output field: name, semantic type, and a description the agent
/// sees. Every observed field is a JSON string.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: &'static str,
    pub description: &'static str,
}

/// A named set of required fields for one document page.
#[derive(Debug, Clone, Copy)]
pub struct OutputSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl OutputSchema {
    /// Render as a JSON Schema object usable as a structured-output
    /// contract (all fields required, no additional properties).
    pub fn json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        for field in self.fields {
            properties.insert(
                field.name.to_string(),
                json!({ "type": field.ty, "description": field.description }),
            );
        }
        json!({
            "type": "object",
            "properties": Value::Object(properties),
            "required": self.fields.iter().map(|f| f.name).collect::<Vec<_>>(),
            "additionalProperties": false,
        })
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}

const fn field(name: &'static str, description: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        ty: "string",
        description,
    }
}

pub static PASSPORT_PAGE_1: OutputSchema = OutputSchema {
    name: "passport_page_1",
    fields: &[
        field("passportNumber", "Passport number exactly as printed"),
        field("firstName", "Given name(s) of the holder"),
        field("lastName", "Surname of the holder"),
        field("dateOfBirth", "Date of birth as printed on the document"),
        field("issueDate", "Date of issue as printed on the document"),
        field("expiryDate", "Date of expiry as printed on the document"),
        field("issuingCountry", "Country that issued the passport"),
        field("issuingState", "State or place of issue"),
        field("gender", "Gender / sex marker"),
        field("nationality", "Nationality of the holder"),
        field("phoneNumber", "Phone number if printed, otherwise empty"),
        field("placeOfBirth", "Place of birth of the holder"),
    ],
};

pub static PASSPORT_PAGE_2: OutputSchema = OutputSchema {
    name: "passport_page_2",
    fields: &[
        field("fatherName", "Name of father or legal guardian"),
        field("motherName", "Name of mother"),
        field("address", "Residential address as printed"),
    ],
};

pub static AADHAAR_FRONT: OutputSchema = OutputSchema {
    name: "aadhaar_front",
    fields: &[
        field("idNumber", "12-digit Aadhaar number as printed"),
        field("name", "Full name of the holder"),
    ],
};

pub static AADHAAR_BACK: OutputSchema = OutputSchema {
    name: "aadhaar_back",
    fields: &[field("address", "Full address as printed on the back side")],
};

pub static PAN_CARD: OutputSchema = OutputSchema {
    name: "pan_card",
    fields: &[
        field("idNumber", "10-character PAN as printed"),
        field("name", "Full name of the holder"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_schema_requires_every_field() {
        let schema = PASSPORT_PAGE_1.json_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), PASSPORT_PAGE_1.fields.len());
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(
            schema["properties"]["passportNumber"]["type"],
            "string"
        );
    }

    #[test]
    fn field_counts_match_the_documented_shapes() {
        assert_eq!(PASSPORT_PAGE_1.fields.len(), 12);
        assert_eq!(PASSPORT_PAGE_2.fields.len(), 3);
        assert_eq!(AADHAAR_FRONT.fields.len(), 2);
        assert_eq!(AADHAAR_BACK.fields.len(), 1);
        assert_eq!(PAN_CARD.fields.len(), 2);
    }
}
