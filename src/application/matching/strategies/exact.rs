use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::ports::match_strategy::{MatchReference, MatchStrategy};

/// Symbol equals the item's id or display name, case-insensitively.
pub struct ExactMatch;

impl MatchStrategy for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn find<'a>(
        &self,
        reference: &MatchReference,
        catalog: &'a [CanonicalMarketItem],
    ) -> Option<&'a CanonicalMarketItem> {
        catalog
            .iter()
            .find(|item| item.id_lower() == reference.symbol || item.name_lower() == reference.symbol)
    }
}
