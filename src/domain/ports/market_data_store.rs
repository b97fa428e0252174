use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// The canonical market-data catalog.
#[async_trait]
pub trait MarketDataStore: Send + Sync {
    /// Full current snapshot.
    async fn get_all(&self) -> Result<Vec<CanonicalMarketItem>, DomainError>;

    async fn get(&self, id: &str) -> Result<Option<CanonicalMarketItem>, DomainError>;

    /// Insert-or-replace by `id`. Failures surface as `DomainError::Persistence`.
    async fn upsert(&self, items: &[CanonicalMarketItem]) -> Result<(), DomainError>;
}
