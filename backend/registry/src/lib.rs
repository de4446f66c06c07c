//! `doclens-registry` — the one piece of real decision logic in DocLens.
//!
//! Holds the per-(document type, page) output schemas and extraction
//! instructions, and the dispatch resolver that maps a request to both.
//! Both registries are `'static` data defined over the same key set and
//! are never mutated after process start.

pub mod instructions;
pub mod resolver;
pub mod schema;

pub use instructions::STRUCTURED_OUTPUT_DIRECTIVE;
pub use resolver::{resolve, DispatchEntry};
pub use schema::{FieldSpec, OutputSchema};
