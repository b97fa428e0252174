use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::ports::match_strategy::{MatchReference, MatchStrategy};

/// `BASE/QUOTE` symbols: the item's name mentions both halves, or the item
/// is keyed `base-quote`.
pub struct RatioMatch;

impl MatchStrategy for RatioMatch {
    fn name(&self) -> &'static str {
        "ratio"
    }

    fn find<'a>(
        &self,
        reference: &MatchReference,
        catalog: &'a [CanonicalMarketItem],
    ) -> Option<&'a CanonicalMarketItem> {
        let (base, quote) = reference.symbol.split_once('/')?;
        let (base, quote) = (base.trim(), quote.trim());
        if base.is_empty() || quote.is_empty() {
            return None;
        }
        let pair = format!("{base}/{quote}");
        let key = format!("{base}-{quote}");

        catalog.iter().find(|item| {
            let name = item.name_lower();
            (name.contains(base) && name.contains(quote)) || name == pair || item.id_lower() == key
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::matching::strategies::fixtures::item;

    #[test]
    fn test_name_contains_both_halves() {
        let catalog = vec![item("fx-1", "Euro / Dolar (EUR USD)")];
        let hit = RatioMatch.find(&MatchReference::new("EUR/USD"), &catalog);
        assert_eq!(hit.map(|i| i.id.as_str()), Some("fx-1"));
    }

    #[test]
    fn test_id_key() {
        let catalog = vec![item("gbp-try", "Sterlin")];
        let hit = RatioMatch.find(&MatchReference::new("GBP / TRY"), &catalog);
        assert_eq!(hit.map(|i| i.id.as_str()), Some("gbp-try"));
    }

    #[test]
    fn test_requires_slash() {
        let catalog = vec![item("usd-try", "USD TRY")];
        assert!(RatioMatch.find(&MatchReference::new("usdtry"), &catalog).is_none());
        assert!(RatioMatch.find(&MatchReference::new("usd/"), &catalog).is_none());
    }
}
