use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection};

use crate::domain::entities::sync_result::SyncLogEntry;
use crate::domain::error::DomainError;
use crate::domain::ports::sync_log_sink::SyncLogSink;
use crate::infrastructure::sqlite::parse_timestamp;

pub struct SqliteSyncLog {
    conn: Mutex<Connection>,
}

impl SqliteSyncLog {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_entry(row: &rusqlite::Row) -> Result<SyncLogEntry, rusqlite::Error> {
        let updated: i64 = row.get(2)?;
        let errors_str: String = row.get(3)?;
        let success: i32 = row.get(4)?;
        let timestamp_str: String = row.get(5)?;

        Ok(SyncLogEntry {
            id: row.get(0)?,
            embed_id: row.get(1)?,
            updated_items: usize::try_from(updated).unwrap_or_default(),
            errors: serde_json::from_str(&errors_str).unwrap_or_default(),
            success: success != 0,
            timestamp: parse_timestamp(&timestamp_str),
        })
    }
}

#[async_trait]
impl SyncLogSink for SqliteSyncLog {
    async fn append(&self, entry: &SyncLogEntry) -> Result<(), DomainError> {
        let errors = serde_json::to_string(&entry.errors)
            .map_err(|e| DomainError::LogSink(e.to_string()))?;
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::LogSink(e.to_string()))?;
        conn.execute(
            "INSERT INTO sync_logs (id, embed_id, updated_items, errors, success, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id,
                entry.embed_id,
                entry.updated_items as i64,
                errors,
                entry.success as i32,
                entry.timestamp.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::LogSink(format!("Failed to append sync log: {e}")))?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<SyncLogEntry>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn.prepare(
            "SELECT id, embed_id, updated_items, errors, success, timestamp
             FROM sync_logs ORDER BY timestamp DESC, rowid DESC LIMIT ?1",
        )?;
        let entries = stmt
            .query_map(params![limit as i64], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
