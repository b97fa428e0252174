pub mod exact;
pub mod near;
pub mod ratio;
pub mod synonym;

pub use exact::ExactMatch;
pub use near::NearMatch;
pub use ratio::RatioMatch;
pub use synonym::SynonymMatch;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::entities::market_item::CanonicalMarketItem;
    use crate::domain::values::category::MarketCategory;
    use crate::domain::values::trend::Trend;

    pub fn item(id: &str, name: &str) -> CanonicalMarketItem {
        CanonicalMarketItem {
            id: id.to_string(),
            display_name: name.to_string(),
            category: MarketCategory::Currency,
            value: "1".to_string(),
            change: 0.0,
            change_percent: "0%".to_string(),
            unit: String::new(),
            last_update: chrono::Utc::now(),
            trend: Trend::Stable,
            source: "seed".to_string(),
            description: None,
        }
    }
}
