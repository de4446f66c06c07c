//! `doclens-store` — the [`doclens_core::DocumentStore`] collaborator,
//! backed by SQLite.

pub mod sqlite;

pub use sqlite::SqliteDocumentStore;
