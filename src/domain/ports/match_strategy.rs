//! Strategy port for resolving one embed reference to a catalog item.
//!
//! Strategies are pure and evaluated in a fixed order by
//! [`MatchPipeline`](crate::application::matching::MatchPipeline); the first
//! one to return `Some` wins, even when a later strategy would have found a
//! closer item.

use crate::domain::entities::market_item::CanonicalMarketItem;

/// A reference symbol prepared once for every strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReference {
    /// Trimmed and lower-cased.
    pub symbol: String,
    /// `symbol` with everything except alphanumerics removed.
    pub compact: String,
}

impl MatchReference {
    pub fn new(raw: &str) -> Self {
        let symbol = raw.trim().to_lowercase();
        let compact = symbol.chars().filter(|c| c.is_alphanumeric()).collect();
        Self { symbol, compact }
    }

    pub fn is_empty(&self) -> bool {
        self.symbol.is_empty()
    }
}

pub trait MatchStrategy: Send + Sync {
    /// Name reported in logs and candidate provenance.
    fn name(&self) -> &'static str;

    fn find<'a>(
        &self,
        reference: &MatchReference,
        catalog: &'a [CanonicalMarketItem],
    ) -> Option<&'a CanonicalMarketItem>;
}
