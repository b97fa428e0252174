use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::ports::match_strategy::{MatchReference, MatchStrategy};
use crate::domain::values::similarity::similarity;

/// The name containing the alphanumeric-only symbol (or the reverse), then
/// fuzzy similarity.
pub struct NearMatch {
    threshold: f64,
}

impl NearMatch {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Default for NearMatch {
    fn default() -> Self {
        Self::new(0.70)
    }
}

impl MatchStrategy for NearMatch {
    fn name(&self) -> &'static str {
        "near"
    }

    fn find<'a>(
        &self,
        reference: &MatchReference,
        catalog: &'a [CanonicalMarketItem],
    ) -> Option<&'a CanonicalMarketItem> {
        if reference.compact.is_empty() {
            return None;
        }
        catalog.iter().find(|item| {
            let name = item.name_lower();
            let contained = !name.is_empty()
                && (name.contains(&reference.compact) || reference.compact.contains(&name));
            contained || similarity(&name, &reference.symbol) > self.threshold
        })
    }
}
