use crate::domain::values::category::MarketCategory;
use crate::domain::values::trend::Trend;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog record for one observable quantity (currency pair, commodity,
/// freight index, fuel price). `id` is unique within the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMarketItem {
    pub id: String,
    pub display_name: String,
    pub category: MarketCategory,
    pub value: String,
    pub change: f64,
    pub change_percent: String,
    pub unit: String,
    pub last_update: DateTime<Utc>,
    pub trend: Trend,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CanonicalMarketItem {
    /// Name used by every matching strategy.
    pub fn name_lower(&self) -> String {
        self.display_name.to_lowercase()
    }

    pub fn id_lower(&self) -> String {
        self.id.to_lowercase()
    }

    /// Keep `trend` consistent with the sign of `change`.
    pub fn with_derived_trend(mut self) -> Self {
        self.trend = Trend::from_change(self.change);
        self
    }

    /// Numeric reading of `value`, ignoring currency glyphs and units.
    pub fn numeric_value(&self) -> Option<f64> {
        crate::domain::values::numeric::parse_formatted_value(&self.value)
    }
}
