use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error text reported when the requested embed does not exist.
pub const EMBED_NOT_FOUND: &str = "Embed verisi bulunamadı";

/// Outcome of one `sync_embed` or `sync_all_embeds` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub success: bool,
    pub updated_items: usize,
    pub errors: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl SyncResult {
    /// `success` is true exactly when `errors` is empty.
    pub fn new(updated_items: usize, errors: Vec<String>) -> Self {
        Self {
            success: errors.is_empty(),
            updated_items,
            errors,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::new(0, vec![error.into()])
    }

    pub fn not_found() -> Self {
        Self::failed(EMBED_NOT_FOUND)
    }
}

/// One row of the append-only sync history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncLogEntry {
    pub id: String,
    pub embed_id: String,
    pub updated_items: usize,
    pub errors: Vec<String>,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

impl SyncLogEntry {
    pub fn from_result(embed_id: &str, result: &SyncResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            embed_id: embed_id.to_string(),
            updated_items: result.updated_items,
            errors: result.errors.clone(),
            success: result.success,
            timestamp: result.timestamp,
        }
    }
}
