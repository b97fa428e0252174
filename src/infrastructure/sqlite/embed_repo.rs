use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::entities::embed::{EmbedData, EmbedRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::embed_repository::EmbedRepository;
use crate::infrastructure::sqlite::parse_timestamp;

const SELECT_COLS: &str = "id, title, content, embed_data, created_at, updated_at";

pub struct SqliteEmbedRepo {
    conn: Mutex<Connection>,
}

impl SqliteEmbedRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_embed(row: &rusqlite::Row) -> Result<EmbedRecord, rusqlite::Error> {
        let id: String = row.get(0)?;
        let data_str: Option<String> = row.get(3)?;
        let created_str: String = row.get(4)?;
        let updated_str: String = row.get(5)?;

        let embed_data = data_str.and_then(|s| match serde_json::from_str::<EmbedData>(&s) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(embed_id = %id, error = %e, "Unreadable embed_data, treating as absent");
                None
            }
        });

        Ok(EmbedRecord {
            id,
            title: row.get(1)?,
            content: row.get(2)?,
            embed_data,
            created_at: parse_timestamp(&created_str),
            updated_at: parse_timestamp(&updated_str),
        })
    }
}

#[async_trait]
impl EmbedRepository for SqliteEmbedRepo {
    async fn get_embed(&self, id: &str) -> Result<Option<EmbedRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let embed = conn
            .query_row(
                &format!("SELECT {SELECT_COLS} FROM embeds WHERE id = ?1"),
                params![id],
                Self::row_to_embed,
            )
            .optional()?;
        Ok(embed)
    }

    async fn list_embeds_with_data(&self) -> Result<Vec<EmbedRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLS} FROM embeds WHERE embed_data IS NOT NULL ORDER BY created_at"
        ))?;
        let embeds = stmt
            .query_map([], Self::row_to_embed)?
            .collect::<Result<Vec<_>, _>>()?;
        // Rows whose JSON could not be read come back without data.
        Ok(embeds.into_iter().filter(|e| e.embed_data.is_some()).collect())
    }

    async fn save_embed(&self, embed: &EmbedRecord) -> Result<(), DomainError> {
        let data = embed
            .embed_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO embeds (id, title, content, embed_data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                embed_data = excluded.embed_data,
                updated_at = excluded.updated_at",
            params![
                embed.id,
                embed.title,
                embed.content,
                data,
                embed.created_at.to_rfc3339(),
                embed.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save embed: {e}")))?;
        Ok(())
    }
}
