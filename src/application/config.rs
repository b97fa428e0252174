/// Tunable thresholds and labels for matching, scoring and merging.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Minimum similarity for the near-match strategy.
    pub near_match_threshold: f64,
    /// Minimum similarity between a free-text keyword and an item name.
    pub keyword_similarity_threshold: f64,
    /// Relative tolerance for numeric proximity candidates.
    pub numeric_tolerance: f64,
    pub max_candidates: usize,
    /// Written to `source` on every merged item.
    pub source_label: String,
    pub default_fuel_unit: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            near_match_threshold: 0.70,
            keyword_similarity_threshold: 0.60,
            numeric_tolerance: 0.20,
            max_candidates: 10,
            source_label: "Embed Sync".to_string(),
            default_fuel_unit: "USD/Varil".to_string(),
        }
    }
}
