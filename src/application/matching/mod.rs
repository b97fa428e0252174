//! Single-best-match resolution used when writing embed values back into the
//! catalog.
//!
//! The pipeline is an ordered list of [`MatchStrategy`] values reduced with
//! "first `Some` wins". Order is the tie-break: an earlier strategy's hit
//! pre-empts any later one, however close the later match would have been.

pub mod strategies;

use std::sync::Arc;

use crate::application::config::SyncConfig;
use crate::domain::entities::embed::EmbedMarketItem;
use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::ports::match_strategy::{MatchReference, MatchStrategy};
use crate::domain::values::synonyms::SynonymTable;
use strategies::{ExactMatch, NearMatch, RatioMatch, SynonymMatch};

/// A resolved item and the strategy that produced it.
#[derive(Debug, Clone, Copy)]
pub struct MatchHit<'a> {
    pub item: &'a CanonicalMarketItem,
    pub strategy: &'static str,
}

pub struct MatchPipeline {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl MatchPipeline {
    pub fn new(strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        Self { strategies }
    }

    /// exact → ratio → synonym → near.
    pub fn standard(table: Arc<SynonymTable>, config: &SyncConfig) -> Self {
        Self::new(vec![
            Box::new(ExactMatch),
            Box::new(RatioMatch),
            Box::new(SynonymMatch::new(table)),
            Box::new(NearMatch::new(config.near_match_threshold)),
        ])
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve a raw symbol. `None` means no strategy matched, which is an
    /// expected outcome rather than an error.
    pub fn resolve<'a>(
        &self,
        symbol: &str,
        catalog: &'a [CanonicalMarketItem],
    ) -> Option<MatchHit<'a>> {
        let reference = MatchReference::new(symbol);
        if reference.is_empty() {
            return None;
        }
        let hit = self.strategies.iter().find_map(|strategy| {
            strategy.find(&reference, catalog).map(|item| MatchHit {
                item,
                strategy: strategy.name(),
            })
        });
        if let Some(h) = &hit {
            tracing::debug!(symbol = %symbol, item = %h.item.id, strategy = h.strategy, "Reference matched");
        }
        hit
    }

    pub fn find_matching_item<'a>(
        &self,
        reference: &EmbedMarketItem,
        catalog: &'a [CanonicalMarketItem],
    ) -> Option<&'a CanonicalMarketItem> {
        self.resolve(&reference.symbol, catalog).map(|h| h.item)
    }
}

#[cfg(test)]
mod tests {
    use super::strategies::fixtures::item;
    use super::*;

    fn pipeline() -> MatchPipeline {
        MatchPipeline::standard(Arc::new(SynonymTable::default()), &SyncConfig::default())
    }

    #[test]
    fn test_strategy_order() {
        assert_eq!(pipeline().strategy_names(), vec!["exact", "ratio", "synonym", "near"]);
    }

    #[test]
    fn test_exact_preempts_closer_fuzzy_candidate() {
        // "usd/tr" is listed first and is a near match for "usd/try"; the exact
        // id match further down must still win.
        let catalog = vec![item("usd-tr", "USD/TR"), item("usd-try", "USD/TRY")];
        let hit = pipeline().resolve("USD/TRY", &catalog).unwrap();
        assert_eq!(hit.item.id, "usd-try");
        assert_eq!(hit.strategy, "exact");
    }

    #[test]
    fn test_earlier_strategy_wins_even_if_weaker() {
        // ratio fires on the first item mentioning both halves before the
        // synonym strategy gets a chance at the better-named item.
        let catalog = vec![item("basket", "EUR and USD basket"), item("eur-usd", "Parite")];
        let hit = pipeline().resolve("eur/usd", &catalog).unwrap();
        assert_eq!(hit.item.id, "basket");
        assert_eq!(hit.strategy, "ratio");
    }

    #[test]
    fn test_falls_through_to_synonym() {
        let catalog = vec![item("usd-try", "Dolar/TL")];
        let hit = pipeline().resolve("Dolar", &catalog).unwrap();
        assert_eq!(hit.strategy, "synonym");
    }

    #[test]
    fn test_no_match_is_none() {
        let catalog = vec![item("usd-try", "USD/TRY")];
        assert!(pipeline().resolve("XYZ-UNKNOWN", &catalog).is_none());
        assert!(pipeline().resolve("   ", &catalog).is_none());
    }

    #[test]
    fn test_find_matching_item_uses_symbol() {
        let catalog = vec![item("brent", "Brent Petrol")];
        let reference = EmbedMarketItem {
            symbol: "Brent".into(),
            value: Some(82.1),
            change: 0.4,
            change_percent: "+0.5%".into(),
            timestamp: None,
        };
        let found = pipeline().find_matching_item(&reference, &catalog);
        assert_eq!(found.map(|i| i.id.as_str()), Some("brent"));
    }
}
