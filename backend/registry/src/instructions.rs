//! Extraction instructions: the natural-language briefs sent to the agent,
//! one per (document type, page). Kept in sync with the output schemas in
//! [`crate::schema`] by construction (see the resolver tests).

/// Fixed directive appended to every agent call.
pub const STRUCTURED_OUTPUT_DIRECTIVE: &str = "Return only the structured data \
extracted from the document image. Do not add commentary, explanations, or any \
fields that are not part of the requested schema. If a value is not readable, \
return an empty string for that field.";

pub static PASSPORT_PAGE_1: &str = "\
You are looking at page 1 of a passport (the biographical data page). \
Extract the following fields exactly as printed:
- Passport number
- First name
- Last name
- Date of birth
- Issue date
- Expiry date
- Issuing country
- Issuing state
- Gender
- Nationality
- Phone number
- Place of birth";

pub static PASSPORT_PAGE_2: &str = "\
You are looking at page 2 of a passport (the family and address page). \
Extract the following fields exactly as printed:
- Father's name
- Mother's name
- Address";

pub static AADHAAR_FRONT: &str = "\
You are looking at the front side of an Aadhaar card. \
Extract the following fields exactly as printed:
- Aadhaar number (the 12-digit ID number)
- Name";

pub static AADHAAR_BACK: &str = "\
You are looking at the back side of an Aadhaar card. \
Extract the following field exactly as printed:
- Address";

pub static PAN_CARD: &str = "\
You are looking at a PAN card. \
Extract the following fields exactly as printed:
- PAN (the 10-character ID number)
- Name";
