use rusqlite::Connection;

use crate::domain::error::DomainError;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS market_items (
            id TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            category TEXT NOT NULL,
            value TEXT NOT NULL,
            change REAL NOT NULL DEFAULT 0,
            change_percent TEXT NOT NULL DEFAULT '',
            unit TEXT NOT NULL DEFAULT '',
            last_update TEXT NOT NULL,
            trend TEXT NOT NULL,
            source TEXT NOT NULL,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS embeds (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            embed_data TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sync_logs (
            id TEXT PRIMARY KEY,
            embed_id TEXT NOT NULL,
            updated_items INTEGER NOT NULL,
            errors TEXT NOT NULL DEFAULT '[]',
            success INTEGER NOT NULL,
            timestamp TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_market_category ON market_items(category);
        CREATE INDEX IF NOT EXISTS idx_sync_logs_timestamp ON sync_logs(timestamp);
        CREATE INDEX IF NOT EXISTS idx_sync_logs_embed ON sync_logs(embed_id);
        ",
    )
    .map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
