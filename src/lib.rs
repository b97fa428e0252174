pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::candidates::{CandidateFinder, MatchCandidate};
use crate::application::config::SyncConfig;
use crate::application::matching::MatchPipeline;
use crate::application::sync::SyncUseCase;
use crate::domain::entities::embed::EmbedRecord;
use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::entities::sync_result::{SyncLogEntry, SyncResult};
use crate::domain::error::DomainError;
use crate::domain::ports::embed_repository::EmbedRepository;
use crate::domain::ports::market_data_store::MarketDataStore;
use crate::domain::ports::sync_log_sink::SyncLogSink;
use crate::domain::values::signals::SignalExtractor;
use crate::domain::values::synonyms::SynonymTable;
use crate::infrastructure::sqlite::embed_repo::SqliteEmbedRepo;
use crate::infrastructure::sqlite::market_store::SqliteMarketStore;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::sync_log::SqliteSyncLog;
use chrono::Utc;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

pub struct MarketSync {
    embeds: Arc<dyn EmbedRepository>,
    store: Arc<dyn MarketDataStore>,
    log: Arc<dyn SyncLogSink>,
    pipeline: Arc<MatchPipeline>,
    sync_uc: SyncUseCase,
    candidate_finder: CandidateFinder,
}

fn open_connection(db_path: &str) -> Result<Connection, DomainError> {
    let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
    run_migrations(&conn)?;
    Ok(conn)
}

impl MarketSync {
    /// Open the SQLite-backed engine. `MARKETSYNC_SYNONYMS` may point at a
    /// JSON synonym table that replaces the built-in vocabulary.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let table = match std::env::var("MARKETSYNC_SYNONYMS") {
            Ok(path) if !path.trim().is_empty() => SynonymTable::load(Path::new(path.trim()))?,
            _ => SynonymTable::default(),
        };
        Self::open(db_path, table, SyncConfig::default())
    }

    pub fn open(db_path: &str, table: SynonymTable, config: SyncConfig) -> Result<Self, DomainError> {
        let embeds: Arc<dyn EmbedRepository> = Arc::new(SqliteEmbedRepo::new(open_connection(db_path)?));
        let store: Arc<dyn MarketDataStore> = Arc::new(SqliteMarketStore::new(open_connection(db_path)?));
        let log: Arc<dyn SyncLogSink> = Arc::new(SqliteSyncLog::new(open_connection(db_path)?));
        Self::with_stores(embeds, store, log, table, config)
    }

    pub fn with_stores(
        embeds: Arc<dyn EmbedRepository>,
        store: Arc<dyn MarketDataStore>,
        log: Arc<dyn SyncLogSink>,
        table: SynonymTable,
        config: SyncConfig,
    ) -> Result<Self, DomainError> {
        let extractor = Arc::new(SignalExtractor::new(&table)?);
        let pipeline = Arc::new(MatchPipeline::standard(Arc::new(table), &config));

        Ok(Self {
            sync_uc: SyncUseCase::new(
                embeds.clone(),
                store.clone(),
                log.clone(),
                pipeline.clone(),
                config.clone(),
            ),
            candidate_finder: CandidateFinder::new(pipeline.clone(), extractor, config),
            embeds,
            store,
            log,
            pipeline,
        })
    }

    pub async fn sync_embed(&self, embed_id: &str) -> SyncResult {
        self.sync_uc.sync_embed(embed_id).await
    }

    pub async fn sync_all_embeds(&self) -> SyncResult {
        self.sync_uc.sync_all_embeds().await
    }

    pub async fn find_candidates(&self, embed_id: &str) -> Result<Vec<MatchCandidate>, DomainError> {
        let embed = self
            .embeds
            .get_embed(embed_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("embed {embed_id}")))?;
        let catalog = self.store.get_all().await?;
        Ok(self.candidate_finder.find_candidates(&embed, &catalog, Utc::now()))
    }

    /// Resolve a bare symbol against the current catalog.
    pub async fn find_matching_item(&self, symbol: &str) -> Result<Option<CanonicalMarketItem>, DomainError> {
        let catalog = self.store.get_all().await?;
        Ok(self.pipeline.resolve(symbol, &catalog).map(|hit| hit.item.clone()))
    }

    pub async fn catalog(&self) -> Result<Vec<CanonicalMarketItem>, DomainError> {
        self.store.get_all().await
    }

    pub async fn get_item(&self, id: &str) -> Result<Option<CanonicalMarketItem>, DomainError> {
        self.store.get(id).await
    }

    /// Seed or correct catalog records. `trend` is re-derived from `change`.
    pub async fn upsert_items(&self, items: Vec<CanonicalMarketItem>) -> Result<usize, DomainError> {
        let items: Vec<CanonicalMarketItem> = items.into_iter().map(|i| i.with_derived_trend()).collect();
        self.store.upsert(&items).await?;
        Ok(items.len())
    }

    pub async fn add_embed(&self, embed: &EmbedRecord) -> Result<(), DomainError> {
        if embed.id.trim().is_empty() {
            return Err(DomainError::InvalidInput("embed id is required".to_string()));
        }
        self.embeds.save_embed(embed).await
    }

    pub async fn sync_logs(&self, limit: usize) -> Result<Vec<SyncLogEntry>, DomainError> {
        self.log.recent(limit).await
    }
}
