pub mod embed_repo;
pub mod market_store;
pub mod migrations;
pub mod sync_log;

use chrono::{DateTime, Utc};

/// Stored timestamps are RFC3339; unreadable ones fall back to now.
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "Invalid stored timestamp, using now");
            Utc::now()
        })
}
