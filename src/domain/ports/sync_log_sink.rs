use crate::domain::entities::sync_result::SyncLogEntry;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Append-only history of sync calls.
///
/// Callers treat `append` as fire-and-forget: a failure is logged and never
/// changes the result that was computed.
#[async_trait]
pub trait SyncLogSink: Send + Sync {
    async fn append(&self, entry: &SyncLogEntry) -> Result<(), DomainError>;

    /// Newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<SyncLogEntry>, DomainError>;
}
