//! SQLite-backed durable store for extraction records.
//!
//! Uses `rusqlite` with the connection behind a `tokio::sync::Mutex`.
//! Records are insert-only; filtering and ordering happen in SQL.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use doclens_core::{
    DocumentStore, ExtractError, ExtractionRecord, NewExtraction, RecordFilter,
};

const SELECT_RECORD: &str =
    "SELECT id, document_type, page_number, fields, image_data_url, created_at FROM extractions";

pub struct SqliteDocumentStore {
    conn: Mutex<Connection>,
}

impl SqliteDocumentStore {
    /// Create or open a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| ExtractError::Storage(format!("failed to open database: {e}")))?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             CREATE TABLE IF NOT EXISTS extractions (
                 id             TEXT PRIMARY KEY,
                 document_type  TEXT NOT NULL,
                 page_number    INTEGER NOT NULL,
                 fields         TEXT NOT NULL,
                 image_data_url TEXT NOT NULL,
                 created_at     TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_extractions_type_page
                 ON extractions(document_type, page_number);
             CREATE INDEX IF NOT EXISTS idx_extractions_created
                 ON extractions(created_at);",
        )
        .map_err(|e| ExtractError::Storage(format!("failed to initialize schema: {e}")))?;

        info!("SqliteDocumentStore opened at {:?}", path.as_ref());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for tests).
    pub fn in_memory() -> Result<Self, ExtractError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ExtractError::Storage(e.to_string()))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS extractions (
                 id             TEXT PRIMARY KEY,
                 document_type  TEXT NOT NULL,
                 page_number    INTEGER NOT NULL,
                 fields         TEXT NOT NULL,
                 image_data_url TEXT NOT NULL,
                 created_at     TEXT NOT NULL
             );",
        )
        .map_err(|e| ExtractError::Storage(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn insert(&self, record: NewExtraction) -> Result<ExtractionRecord, ExtractError> {
        let conn = self.conn.lock().await;

        let record = ExtractionRecord {
            id: Uuid::new_v4(),
            document_type: record.document_type,
            page_number: record.page_number,
            fields: record.fields,
            image_data_url: record.image_data_url,
            created_at: Utc::now(),
        };
        let fields_json = serde_json::to_string(&record.fields)
            .map_err(|e| ExtractError::Storage(e.to_string()))?;

        conn.execute(
            "INSERT INTO extractions (id, document_type, page_number, fields, image_data_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id.to_string(),
                record.document_type.as_str(),
                record.page_number as i64,
                fields_json,
                record.image_data_url,
                record.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| ExtractError::Storage(e.to_string()))?;

        debug!(id = %record.id, document_type = %record.document_type, "inserted extraction record");
        Ok(record)
    }

    async fn list(&self, filter: RecordFilter) -> Result<Vec<ExtractionRecord>, ExtractError> {
        let conn = self.conn.lock().await;

        // Ties on created_at fall back to insertion order, newest first.
        let records = match (filter.document_type, filter.page_number) {
            (Some(doc), Some(page)) => select(
                &conn,
                &format!(
                    "{SELECT_RECORD} WHERE document_type = ?1 AND page_number = ?2
                     ORDER BY created_at DESC, rowid DESC"
                ),
                params![doc.as_str(), page as i64],
            ),
            (Some(doc), None) => select(
                &conn,
                &format!(
                    "{SELECT_RECORD} WHERE document_type = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                params![doc.as_str()],
            ),
            (None, Some(page)) => select(
                &conn,
                &format!(
                    "{SELECT_RECORD} WHERE page_number = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                params![page as i64],
            ),
            (None, None) => select(
                &conn,
                &format!("{SELECT_RECORD} ORDER BY created_at DESC, rowid DESC"),
                params![],
            ),
        };

        records.map_err(|e| ExtractError::Storage(e.to_string()))
    }

    async fn get(&self, id: Uuid) -> Result<Option<ExtractionRecord>, ExtractError> {
        let conn = self.conn.lock().await;
        conn.query_row(
            &format!("{SELECT_RECORD} WHERE id = ?1"),
            params![id.to_string()],
            row_to_record,
        )
        .optional()
        .map_err(|e| ExtractError::Storage(e.to_string()))
    }
}

fn select(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> rusqlite::Result<Vec<ExtractionRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_record)?;
    rows.collect()
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<ExtractionRecord> {
    let id_str: String = row.get(0)?;
    let document_type_str: String = row.get(1)?;
    let page_number: i64 = row.get(2)?;
    let fields_json: String = row.get(3)?;
    let image_data_url: String = row.get(4)?;
    let created_at_str: String = row.get(5)?;

    let id = Uuid::parse_str(&id_str)
        .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?;
    let document_type = document_type_str
        .parse()
        .map_err(|e: doclens_core::UnknownDocumentType| {
            rusqlite::Error::InvalidParameterName(e.to_string())
        })?;
    let fields = serde_json::from_str(&fields_json)
        .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?;

    Ok(ExtractionRecord {
        id,
        document_type,
        page_number: page_number as u32,
        fields,
        image_data_url,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclens_core::{
        AadhaarFront, DocumentType, ExtractedFields, PanCardFields,
    };

    fn pan_record() -> NewExtraction {
        NewExtraction {
            document_type: DocumentType::PanCard,
            page_number: 1,
            fields: ExtractedFields::PanCard(PanCardFields {
                id_number: "ABCDE1234F".into(),
                name: "Test Person".into(),
            }),
            image_data_url: "data:image/jpeg;base64,AAAA".into(),
        }
    }

    fn aadhaar_record() -> NewExtraction {
        NewExtraction {
            document_type: DocumentType::Aadhaar,
            page_number: 1,
            fields: ExtractedFields::AadhaarFront(AadhaarFront {
                id_number: "1234 5678 9012".into(),
                name: "Test Person".into(),
            }),
            image_data_url: "data:image/jpeg;base64,BBBB".into(),
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        let inserted = store.insert(pan_record()).await.unwrap();

        let fetched = store.get(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, inserted.id);
        assert_eq!(fetched.document_type, DocumentType::PanCard);
        assert_eq!(fetched.page_number, 1);
        assert_eq!(fetched.fields, inserted.fields);
        assert_eq!(fetched.image_data_url, inserted.image_data_url);
    }

    #[tokio::test]
    async fn get_missing_id_returns_none() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        let first = store.insert(pan_record()).await.unwrap();
        let second = store.insert(pan_record()).await.unwrap();
        let third = store.insert(pan_record()).await.unwrap();

        let records = store.list(RecordFilter::default()).await.unwrap();
        let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn filters_are_conjunctive() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        store.insert(pan_record()).await.unwrap();
        store.insert(aadhaar_record()).await.unwrap();

        let by_type = store
            .list(RecordFilter {
                document_type: Some(DocumentType::Aadhaar),
                page_number: None,
            })
            .await
            .unwrap();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].document_type, DocumentType::Aadhaar);

        let both = store
            .list(RecordFilter {
                document_type: Some(DocumentType::Aadhaar),
                page_number: Some(2),
            })
            .await
            .unwrap();
        assert!(both.is_empty());

        let by_page = store
            .list(RecordFilter {
                document_type: None,
                page_number: Some(1),
            })
            .await
            .unwrap();
        assert_eq!(by_page.len(), 2);
    }

    #[tokio::test]
    async fn identical_inserts_get_distinct_ids() {
        let store = SqliteDocumentStore::in_memory().unwrap();
        let a = store.insert(pan_record()).await.unwrap();
        let b = store.insert(pan_record()).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.list(RecordFilter::default()).await.unwrap().len(), 2);
    }
}
