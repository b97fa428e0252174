use std::sync::Arc;

use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::ports::match_strategy::{MatchReference, MatchStrategy};
use crate::domain::values::synonyms::{SynonymTable, SynonymTopic};

/// Map the symbol to topics in the synonym table, strongest first, and take
/// the item whose name carries the longest synonym of the first topic that
/// has one.
///
/// A currency-pair symbol (`gbpusd`) only accepts items through synonyms that
/// name the whole pair, and when no topic covers the pair, falls back to an
/// item whose name carries both codes.
pub struct SynonymMatch {
    table: Arc<SynonymTable>,
}

impl SynonymMatch {
    pub fn new(table: Arc<SynonymTable>) -> Self {
        Self { table }
    }

    fn best_item<'a>(
        &self,
        topic: &SynonymTopic,
        is_pair: bool,
        catalog: &'a [CanonicalMarketItem],
    ) -> Option<&'a CanonicalMarketItem> {
        let mut best: Option<(usize, &'a CanonicalMarketItem)> = None;
        for item in catalog {
            let name = item.name_lower();
            let strength = topic
                .synonyms
                .iter()
                .filter(|s| !(is_pair && self.table.is_bare_code(s)))
                .filter(|s| name.contains(s.as_str()))
                .map(|s| s.chars().count())
                .max();
            if let Some(len) = strength {
                if best.map_or(true, |(b, _)| len > b) {
                    best = Some((len, item));
                }
            }
        }
        best.map(|(_, item)| item)
    }
}

impl MatchStrategy for SynonymMatch {
    fn name(&self) -> &'static str {
        "synonym"
    }

    fn find<'a>(
        &self,
        reference: &MatchReference,
        catalog: &'a [CanonicalMarketItem],
    ) -> Option<&'a CanonicalMarketItem> {
        let pair = self.table.currency_pair(&reference.compact);
        let from_topic = self
            .table
            .topics_for(&reference.symbol)
            .into_iter()
            .find_map(|topic| self.best_item(topic, pair.is_some(), catalog));
        if from_topic.is_some() {
            return from_topic;
        }

        let (base, quote) = pair?;
        catalog.iter().find(|item| {
            let name = item.name_lower();
            name.contains(base) && name.contains(quote)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::matching::strategies::fixtures::item;

    fn strategy() -> SynonymMatch {
        SynonymMatch::new(Arc::new(SynonymTable::default()))
    }

    #[test]
    fn test_turkish_surface_form() {
        let catalog = vec![item("brent", "Brent Petrol"), item("xau", "Ons Altın")];
        let hit = strategy().find(&MatchReference::new("Altın"), &catalog);
        assert_eq!(hit.map(|i| i.id.as_str()), Some("xau"));
    }

    #[test]
    fn test_topic_key_match() {
        let catalog = vec![item("bdi-index", "Baltic Dry Index")];
        let hit = strategy().find(&MatchReference::new("BDI"), &catalog);
        assert_eq!(hit.map(|i| i.id.as_str()), Some("bdi-index"));
    }

    #[test]
    fn test_longest_synonym_picks_item() {
        // both names mention "usd"; only one names the whole pair
        let catalog = vec![item("eur-usd", "EUR/USD"), item("usd-try", "USD/TRY")];
        let hit = strategy().find(&MatchReference::new("USDTRY"), &catalog);
        assert_eq!(hit.map(|i| i.id.as_str()), Some("usd-try"));
    }

    #[test]
    fn test_pair_without_topic_needs_both_codes() {
        let catalog = vec![
            item("usd-try", "USD/TRY"),
            item("eur-usd", "EUR/USD"),
            item("gbp-usd", "GBP/USD"),
        ];
        let hit = strategy().find(&MatchReference::new("GBPUSD"), &catalog);
        assert_eq!(hit.map(|i| i.id.as_str()), Some("gbp-usd"));
    }

    #[test]
    fn test_pair_never_claims_half_match() {
        let catalog = vec![item("eur-usd", "EUR/USD"), item("usd-try", "Dolar/TL")];
        assert!(strategy().find(&MatchReference::new("GBPUSD"), &catalog).is_none());
    }

    #[test]
    fn test_topic_without_catalog_item() {
        let catalog = vec![item("wheat", "Buğday")];
        assert!(strategy().find(&MatchReference::new("brent"), &catalog).is_none());
    }
}
