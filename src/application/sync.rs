use std::sync::Arc;

use chrono::Utc;

use crate::application::config::SyncConfig;
use crate::application::matching::MatchPipeline;
use crate::application::merge::{merge_currency_rate, merge_fuel_price, merge_market_item};
use crate::domain::entities::embed::EmbedRecord;
use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::entities::sync_result::{SyncLogEntry, SyncResult};
use crate::domain::error::DomainError;
use crate::domain::ports::embed_repository::EmbedRepository;
use crate::domain::ports::market_data_store::MarketDataStore;
use crate::domain::ports::sync_log_sink::SyncLogSink;

/// Drives embed → catalog synchronization.
///
/// Stateless between calls. Within one call the three hint lists are
/// processed sequentially, and a failure on one hint is recorded in the
/// result without stopping the rest. Only a missing embed aborts a call.
pub struct SyncUseCase {
    embeds: Arc<dyn EmbedRepository>,
    store: Arc<dyn MarketDataStore>,
    log: Arc<dyn SyncLogSink>,
    pipeline: Arc<MatchPipeline>,
    config: SyncConfig,
}

/// Running tally for one embed.
#[derive(Default)]
struct Tally {
    updated: usize,
    errors: Vec<String>,
}

impl Tally {
    fn record(&mut self, label: String, outcome: Result<(), DomainError>) {
        match outcome {
            Ok(()) => self.updated += 1,
            Err(e) => {
                tracing::warn!(item = %label, error = %e, "Embed hint not applied");
                self.errors.push(format!("{label}: {e}"));
            }
        }
    }
}

impl SyncUseCase {
    pub fn new(
        embeds: Arc<dyn EmbedRepository>,
        store: Arc<dyn MarketDataStore>,
        log: Arc<dyn SyncLogSink>,
        pipeline: Arc<MatchPipeline>,
        config: SyncConfig,
    ) -> Self {
        Self {
            embeds,
            store,
            log,
            pipeline,
            config,
        }
    }

    pub async fn sync_embed(&self, embed_id: &str) -> SyncResult {
        let embed = match self.embeds.get_embed(embed_id).await {
            Ok(Some(embed)) => embed,
            Ok(None) => return SyncResult::not_found(),
            Err(e) => return SyncResult::failed(format!("Embed read failed: {e}")),
        };

        let result = match self.store.get_all().await {
            Ok(catalog) => self.apply_hints(&embed, &catalog).await,
            Err(e) => SyncResult::failed(format!("Catalog read failed: {e}")),
        };

        tracing::info!(
            embed_id = %embed_id,
            updated = result.updated_items,
            errors = result.errors.len(),
            "Embed synchronized"
        );

        if let Err(e) = self.log.append(&SyncLogEntry::from_result(embed_id, &result)).await {
            tracing::warn!(embed_id = %embed_id, error = %e, "Sync log append failed");
        }

        result
    }

    /// Sync every embed that carries structured data, one after another.
    /// Each error is prefixed with the id of the embed it came from.
    pub async fn sync_all_embeds(&self) -> SyncResult {
        let embeds = match self.embeds.list_embeds_with_data().await {
            Ok(embeds) => embeds,
            Err(e) => return SyncResult::failed(format!("Embed listing failed: {e}")),
        };

        let mut updated = 0;
        let mut errors = Vec::new();
        for embed in &embeds {
            let result = self.sync_embed(&embed.id).await;
            updated += result.updated_items;
            errors.extend(result.errors.into_iter().map(|e| format!("{}: {e}", embed.id)));
        }

        tracing::info!(
            embeds = embeds.len(),
            updated,
            errors = errors.len(),
            "Bulk synchronization finished"
        );
        SyncResult::new(updated, errors)
    }

    async fn apply_hints(&self, embed: &EmbedRecord, catalog: &[CanonicalMarketItem]) -> SyncResult {
        let mut tally = Tally::default();
        let Some(data) = &embed.embed_data else {
            return SyncResult::new(0, Vec::new());
        };
        let now = Utc::now();

        for hint in data.market_items.iter().flatten() {
            let Some(existing) = self.pipeline.find_matching_item(hint, catalog) else {
                tracing::debug!(symbol = %hint.symbol, "No catalog item for reference, skipping");
                continue;
            };
            let outcome = match merge_market_item(existing, hint, now, &self.config) {
                Ok(record) => self.write(record).await,
                Err(e) => Err(e),
            };
            tally.record(format!("Market item {}", hint.symbol), outcome);
        }

        for rate in data.currency_rates.iter().flatten() {
            let outcome = match merge_currency_rate(rate, now, &self.config) {
                Ok(record) => self.write(record).await,
                Err(e) => Err(e),
            };
            tally.record(format!("Currency rate {}/{}", rate.from, rate.to), outcome);
        }

        for fuel in data.fuel_prices.iter().flatten() {
            let outcome = match merge_fuel_price(fuel, now, &self.config) {
                Ok(record) => self.write(record).await,
                Err(e) => Err(e),
            };
            tally.record(format!("Fuel price {}", fuel.fuel_type), outcome);
        }

        SyncResult::new(tally.updated, tally.errors)
    }

    async fn write(&self, record: CanonicalMarketItem) -> Result<(), DomainError> {
        self.store.upsert(std::slice::from_ref(&record)).await
    }
}
