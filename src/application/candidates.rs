//! Multi-source candidate search for "suggest matches" views.
//!
//! Unlike [`MatchPipeline::resolve`](crate::application::matching::MatchPipeline::resolve),
//! which picks one item for a write, this collects every plausible item from
//! four signal sources, merges duplicates per catalog id and ranks them.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::application::config::SyncConfig;
use crate::application::matching::MatchPipeline;
use crate::domain::entities::embed::EmbedRecord;
use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::values::numeric::within_tolerance;
use crate::domain::values::signals::SignalExtractor;
use crate::domain::values::similarity::similarity;

const BASE_SCORE: f64 = 0.5;
const CATEGORY_BONUS: f64 = 0.1;
const FRESH_BONUS: f64 = 0.1;
const RECENT_BONUS: f64 = 0.05;

/// Which signal proposed a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    /// Structured `marketItems` hint resolved by the match pipeline.
    Direct,
    /// Structured `currencyRates` hint.
    Currency,
    /// Keyword from the free text.
    Keyword,
    /// Number from the free text close to the item's value.
    Numeric,
}

impl MatchSource {
    pub fn bonus(&self) -> f64 {
        match self {
            MatchSource::Direct => 0.4,
            MatchSource::Currency => 0.3,
            MatchSource::Keyword => 0.2,
            MatchSource::Numeric => 0.1,
        }
    }
}

/// A scored proposal that an embed refers to a catalog item. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub item: CanonicalMarketItem,
    pub match_score: f64,
    pub provenance: String,
    pub sources: Vec<MatchSource>,
}

#[derive(Debug, Clone)]
struct RawMatch {
    item: CanonicalMarketItem,
    source: MatchSource,
    provenance: String,
}

/// Composite score for one catalog item hit by `sources`.
///
/// Starts at 0.5, adds each distinct source's bonus, +0.1 for currency, fuel
/// and commodity items, and +0.1 (under an hour old) or +0.05 (under a day)
/// for freshness. Capped at 1.0.
pub fn calculate_item_score(
    item: &CanonicalMarketItem,
    sources: &[MatchSource],
    now: DateTime<Utc>,
) -> f64 {
    let distinct: BTreeSet<MatchSource> = sources.iter().copied().collect();
    let mut score = BASE_SCORE + distinct.iter().map(MatchSource::bonus).sum::<f64>();

    if item.category.is_bonus_category() {
        score += CATEGORY_BONUS;
    }

    let age = now - item.last_update;
    if age < Duration::hours(1) {
        score += FRESH_BONUS;
    } else if age < Duration::hours(24) {
        score += RECENT_BONUS;
    }

    score.min(1.0)
}

pub struct CandidateFinder {
    pipeline: Arc<MatchPipeline>,
    extractor: Arc<SignalExtractor>,
    config: SyncConfig,
}

impl CandidateFinder {
    pub fn new(
        pipeline: Arc<MatchPipeline>,
        extractor: Arc<SignalExtractor>,
        config: SyncConfig,
    ) -> Self {
        Self {
            pipeline,
            extractor,
            config,
        }
    }

    /// Ranked, de-duplicated candidates for `embed`, best first, at most
    /// `max_candidates` long.
    pub fn find_candidates(
        &self,
        embed: &EmbedRecord,
        catalog: &[CanonicalMarketItem],
        now: DateTime<Utc>,
    ) -> Vec<MatchCandidate> {
        let mut raw = Vec::new();
        raw.extend(self.direct_matches(embed, catalog));
        raw.extend(self.currency_matches(embed, catalog));

        let signals = self.extractor.extract(&embed.searchable_text());
        for keyword in &signals.keywords {
            raw.extend(self.keyword_matches(keyword, catalog));
        }
        for number in &signals.numbers {
            raw.extend(self.numeric_matches(*number, catalog));
        }

        self.rank(raw, now)
    }

    fn direct_matches(&self, embed: &EmbedRecord, catalog: &[CanonicalMarketItem]) -> Vec<RawMatch> {
        let Some(items) = embed.embed_data.as_ref().and_then(|d| d.market_items.as_ref()) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|reference| {
                self.pipeline.resolve(&reference.symbol, catalog).map(|hit| RawMatch {
                    item: hit.item.clone(),
                    source: MatchSource::Direct,
                    provenance: format!("direct:{} via {}", reference.symbol, hit.strategy),
                })
            })
            .collect()
    }

    fn currency_matches(&self, embed: &EmbedRecord, catalog: &[CanonicalMarketItem]) -> Vec<RawMatch> {
        let Some(rates) = embed.embed_data.as_ref().and_then(|d| d.currency_rates.as_ref()) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for rate in rates {
            let from = rate.from.trim().to_lowercase();
            let to = rate.to.trim().to_lowercase();
            if from.is_empty() || to.is_empty() {
                continue;
            }
            for item in catalog {
                let name = item.name_lower();
                if name.contains(&from) && name.contains(&to) {
                    out.push(RawMatch {
                        item: item.clone(),
                        source: MatchSource::Currency,
                        provenance: format!("currency:{from}/{to}"),
                    });
                }
            }
        }
        out
    }

    fn keyword_matches(&self, keyword: &str, catalog: &[CanonicalMarketItem]) -> Vec<RawMatch> {
        catalog
            .iter()
            .filter(|item| {
                let name = item.name_lower();
                name.contains(keyword)
                    || item
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(keyword))
                    || similarity(&name, keyword) > self.config.keyword_similarity_threshold
            })
            .map(|item| RawMatch {
                item: item.clone(),
                source: MatchSource::Keyword,
                provenance: format!("keyword:{keyword}"),
            })
            .collect()
    }

    fn numeric_matches(&self, number: f64, catalog: &[CanonicalMarketItem]) -> Vec<RawMatch> {
        catalog
            .iter()
            .filter(|item| {
                item.numeric_value()
                    .is_some_and(|v| within_tolerance(v, number, self.config.numeric_tolerance))
            })
            .map(|item| RawMatch {
                item: item.clone(),
                source: MatchSource::Numeric,
                provenance: format!("numeric:{number}"),
            })
            .collect()
    }

    fn rank(&self, raw: Vec<RawMatch>, now: DateTime<Utc>) -> Vec<MatchCandidate> {
        let mut groups: HashMap<String, Vec<RawMatch>> = HashMap::new();
        for m in raw {
            groups.entry(m.item.id.clone()).or_default().push(m);
        }

        let mut candidates: Vec<MatchCandidate> = groups
            .into_values()
            .filter_map(|group| {
                let sources: Vec<MatchSource> = group.iter().map(|m| m.source).collect();
                // Representative snapshot: the strongest single source, first one on ties.
                let best = group.into_iter().reduce(|best, m| {
                    if m.source.bonus() > best.source.bonus() {
                        m
                    } else {
                        best
                    }
                })?;
                let score = calculate_item_score(&best.item, &sources, now);
                let mut distinct = sources;
                distinct.sort();
                distinct.dedup();
                Some(MatchCandidate {
                    item: best.item,
                    match_score: score,
                    provenance: best.provenance,
                    sources: distinct,
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.item.id.cmp(&b.item.id))
        });
        candidates.truncate(self.config.max_candidates);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::matching::strategies::fixtures::item;
    use crate::domain::values::category::MarketCategory;

    #[test]
    fn test_score_stacks_and_caps() {
        let now = Utc::now();
        let fresh = item("usd-try", "USD/TRY");
        let all = [
            MatchSource::Direct,
            MatchSource::Currency,
            MatchSource::Keyword,
            MatchSource::Numeric,
        ];
        assert_eq!(calculate_item_score(&fresh, &all, now), 1.0);
    }

    #[test]
    fn test_score_components() {
        let now = Utc::now();
        let mut freight = item("bdi", "Baltic Dry Index");
        freight.category = MarketCategory::Freight;
        freight.last_update = now - Duration::hours(5);
        // base + keyword + recent
        let score = calculate_item_score(&freight, &[MatchSource::Keyword], now);
        assert!((score - 0.75).abs() < 1e-9);

        freight.last_update = now - Duration::days(3);
        let stale = calculate_item_score(&freight, &[MatchSource::Numeric], now);
        assert!((stale - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_source_counts_once() {
        let now = Utc::now();
        let mut old = item("brent", "Brent");
        old.category = MarketCategory::Index;
        old.last_update = now - Duration::days(2);
        let once = calculate_item_score(&old, &[MatchSource::Numeric], now);
        let twice = calculate_item_score(&old, &[MatchSource::Numeric, MatchSource::Numeric], now);
        assert_eq!(once, twice);
    }
}
