use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published content block that may carry structured market hints.
/// Read-only to the sync engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub embed_data: Option<EmbedData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmbedRecord {
    /// Title and body, the text the keyword extractor sees.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

/// Structured hints. Each list is independently present or absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedData {
    #[serde(default)]
    pub market_items: Option<Vec<EmbedMarketItem>>,
    #[serde(default)]
    pub currency_rates: Option<Vec<EmbedCurrencyRate>>,
    #[serde(default)]
    pub fuel_prices: Option<Vec<EmbedFuelPrice>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedMarketItem {
    pub symbol: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedCurrencyRate {
    pub from: String,
    pub to: String,
    pub rate: f64,
    #[serde(default)]
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedFuelPrice {
    #[serde(rename = "type")]
    pub fuel_type: String,
    pub price: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub change: f64,
}
