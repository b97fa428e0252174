//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use marketsync::application::config::SyncConfig;
use marketsync::domain::entities::embed::{EmbedData, EmbedMarketItem, EmbedRecord};
use marketsync::domain::entities::market_item::CanonicalMarketItem;
use marketsync::domain::entities::sync_result::SyncLogEntry;
use marketsync::domain::error::DomainError;
use marketsync::domain::ports::embed_repository::EmbedRepository;
use marketsync::domain::ports::market_data_store::MarketDataStore;
use marketsync::domain::ports::sync_log_sink::SyncLogSink;
use marketsync::domain::values::category::MarketCategory;
use marketsync::domain::values::synonyms::SynonymTable;
use marketsync::domain::values::trend::Trend;
use marketsync::MarketSync;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

pub fn setup() -> MarketSync {
    MarketSync::open(":memory:", SynonymTable::default(), SyncConfig::default()).unwrap()
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
}

pub fn make_item(id: &str, name: &str, category: MarketCategory, value: &str) -> CanonicalMarketItem {
    CanonicalMarketItem {
        id: id.to_string(),
        display_name: name.to_string(),
        category,
        value: value.to_string(),
        change: 0.0,
        change_percent: "0%".to_string(),
        unit: String::new(),
        last_update: Utc::now(),
        trend: Trend::Stable,
        source: "seed".to_string(),
        description: None,
    }
}

pub fn market_hint(symbol: &str, value: f64, change: f64, pct: &str) -> EmbedMarketItem {
    EmbedMarketItem {
        symbol: symbol.to_string(),
        value: Some(value),
        change,
        change_percent: pct.to_string(),
        timestamp: Some(fixed_time()),
    }
}

pub fn make_embed(id: &str, content: &str, data: Option<EmbedData>) -> EmbedRecord {
    EmbedRecord {
        id: id.to_string(),
        title: format!("Piyasa notu {id}"),
        content: content.to_string(),
        embed_data: data,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn market_data(items: Vec<EmbedMarketItem>) -> EmbedData {
    EmbedData {
        market_items: Some(items),
        ..Default::default()
    }
}

/// Embeds held in memory.
#[derive(Default)]
pub struct MemoryEmbeds {
    embeds: Mutex<BTreeMap<String, EmbedRecord>>,
}

impl MemoryEmbeds {
    pub fn with(embeds: Vec<EmbedRecord>) -> Self {
        let map = embeds.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self {
            embeds: Mutex::new(map),
        }
    }
}

#[async_trait]
impl EmbedRepository for MemoryEmbeds {
    async fn get_embed(&self, id: &str) -> Result<Option<EmbedRecord>, DomainError> {
        Ok(self.embeds.lock().unwrap().get(id).cloned())
    }

    async fn list_embeds_with_data(&self) -> Result<Vec<EmbedRecord>, DomainError> {
        Ok(self
            .embeds
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.embed_data.is_some())
            .cloned()
            .collect())
    }

    async fn save_embed(&self, embed: &EmbedRecord) -> Result<(), DomainError> {
        self.embeds.lock().unwrap().insert(embed.id.clone(), embed.clone());
        Ok(())
    }
}

/// Catalog held in memory that rejects writes to chosen ids.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, CanonicalMarketItem>>,
    failing_ids: HashSet<String>,
    pub upsert_calls: Mutex<usize>,
}

impl MemoryStore {
    pub fn with(items: Vec<CanonicalMarketItem>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().map(|i| (i.id.clone(), i)).collect()),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, ids: &[&str]) -> Self {
        self.failing_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn snapshot(&self, id: &str) -> Option<CanonicalMarketItem> {
        self.items.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl MarketDataStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<CanonicalMarketItem>, DomainError> {
        Ok(self.items.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<CanonicalMarketItem>, DomainError> {
        Ok(self.snapshot(id))
    }

    async fn upsert(&self, items: &[CanonicalMarketItem]) -> Result<(), DomainError> {
        *self.upsert_calls.lock().unwrap() += 1;
        if let Some(bad) = items.iter().find(|i| self.failing_ids.contains(&i.id)) {
            return Err(DomainError::Persistence(format!("write rejected for {}", bad.id)));
        }
        let mut map = self.items.lock().unwrap();
        for item in items {
            map.insert(item.id.clone(), item.clone());
        }
        Ok(())
    }
}

/// Log sink that records entries, or fails every append.
#[derive(Default)]
pub struct MemoryLog {
    pub entries: Mutex<Vec<SyncLogEntry>>,
    fail: bool,
}

impl MemoryLog {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl SyncLogSink for MemoryLog {
    async fn append(&self, entry: &SyncLogEntry) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::LogSink("log table unavailable".to_string()));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<SyncLogEntry>, DomainError> {
        Ok(self.entries.lock().unwrap().iter().rev().take(limit).cloned().collect())
    }
}

pub fn with_doubles(
    embeds: MemoryEmbeds,
    store: Arc<MemoryStore>,
    log: Arc<MemoryLog>,
) -> MarketSync {
    MarketSync::with_stores(
        Arc::new(embeds),
        store,
        log,
        SynonymTable::default(),
        SyncConfig::default(),
    )
    .unwrap()
}
