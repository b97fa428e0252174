use crate::domain::entities::embed::EmbedRecord;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Source of embeds. Reads have no side effects.
#[async_trait]
pub trait EmbedRepository: Send + Sync {
    async fn get_embed(&self, id: &str) -> Result<Option<EmbedRecord>, DomainError>;

    /// Only records whose `embed_data` is present.
    async fn list_embeds_with_data(&self) -> Result<Vec<EmbedRecord>, DomainError>;

    async fn save_embed(&self, embed: &EmbedRecord) -> Result<(), DomainError>;
}
