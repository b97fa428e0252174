//! Data-driven market vocabulary.
//!
//! The matching and extraction code never names a currency, commodity or
//! index directly: everything it recognises comes from a [`SynonymTable`].
//! The built-in table covers the Turkish/English vocabulary seen in market
//! commentary; hosts can replace it with a JSON document of the same shape
//! (see [`SynonymTable::from_json_str`]).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// One canonical topic (e.g. `usdtry`) and the surface forms that refer to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymTopic {
    pub key: String,
    pub synonyms: Vec<String>,
}

/// A currency glyph and the ISO-ish code it stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySymbol {
    pub symbol: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymTable {
    /// Table order breaks ties between equally strong topics.
    pub topics: Vec<SynonymTopic>,
    /// Domain name (currencies, commodities, ...) to substring terms.
    pub keyword_groups: BTreeMap<String, Vec<String>>,
    /// Words that may follow a number, e.g. `82 varil`.
    pub unit_words: Vec<String>,
    /// Currency words that may follow a number, e.g. `27 dolar`.
    pub currency_tokens: Vec<String>,
    pub currency_symbols: Vec<CurrencySymbol>,
}

fn topic(key: &str, synonyms: &[&str]) -> SynonymTopic {
    SynonymTopic {
        key: key.to_string(),
        synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for SynonymTable {
    fn default() -> Self {
        let topics = vec![
            topic("usdtry", &["usd/try", "usdtry", "dolar", "dollar", "usd", "$"]),
            topic("eurtry", &["eur/try", "eurtry", "euro", "eur", "€"]),
            topic("eurusd", &["eur/usd", "eurusd", "parite"]),
            topic("gbptry", &["gbp/try", "gbptry", "sterlin", "pound", "gbp", "£"]),
            topic("brent", &["brent", "brent petrol", "brent oil"]),
            topic("wti", &["wti", "west texas", "ham petrol", "crude"]),
            topic("gold", &["gold", "altın", "altin", "xau", "ons altın"]),
            topic("silver", &["silver", "gümüş", "gumus", "xag"]),
            topic("copper", &["copper", "bakır", "bakir"]),
            topic("wheat", &["wheat", "buğday", "bugday"]),
            topic("bdi", &["bdi", "baltic dry", "baltık kuru yük", "baltic dry index"]),
            topic("scfi", &["scfi", "shanghai containerized", "konteyner navlun"]),
            topic("diesel", &["diesel", "motorin", "dizel"]),
            topic("gasoline", &["gasoline", "benzin"]),
        ];

        let mut keyword_groups = BTreeMap::new();
        keyword_groups.insert(
            "currencies".to_string(),
            words(&["usd", "eur", "try", "gbp", "dolar", "euro", "sterlin", "lira"]),
        );
        keyword_groups.insert(
            "commodities".to_string(),
            words(&[
                "gold", "altın", "silver", "gümüş", "brent", "wti", "petrol", "oil", "copper",
                "bakır", "wheat", "buğday", "motorin", "benzin",
            ]),
        );
        keyword_groups.insert(
            "indices".to_string(),
            words(&["bdi", "baltic", "scfi", "bist", "endeks", "index"]),
        );
        keyword_groups.insert(
            "units".to_string(),
            words(&["ton", "varil", "barrel", "ons", "ounce", "litre", "gram", "teu"]),
        );
        keyword_groups.insert(
            "market_terms".to_string(),
            words(&["fiyat", "price", "kur", "navlun", "freight", "piyasa", "market"]),
        );

        Self {
            topics,
            keyword_groups,
            unit_words: words(&[
                "ton", "varil", "barrel", "ons", "ounce", "litre", "lt", "gram", "kg", "teu",
            ]),
            currency_tokens: words(&["usd", "eur", "try", "tl", "gbp", "dolar", "euro", "lira"]),
            currency_symbols: vec![
                CurrencySymbol { symbol: "$".into(), code: "usd".into() },
                CurrencySymbol { symbol: "€".into(), code: "eur".into() },
                CurrencySymbol { symbol: "₺".into(), code: "try".into() },
            ],
        }
    }
}

impl SynonymTable {
    /// Parse a table from JSON. Every entry is lower-cased so lookups can
    /// compare against lower-cased input directly.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let table: SynonymTable = serde_json::from_str(json)
            .map_err(|e| DomainError::Config(format!("Invalid synonym table: {e}")))?;
        Ok(table.normalized())
    }

    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!("Cannot read synonym table {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    fn normalized(mut self) -> Self {
        let lower = |v: &mut Vec<String>| {
            for s in v.iter_mut() {
                *s = s.trim().to_lowercase();
            }
            v.retain(|s| !s.is_empty());
        };
        for t in &mut self.topics {
            t.key = t.key.trim().to_lowercase();
            lower(&mut t.synonyms);
        }
        for terms in self.keyword_groups.values_mut() {
            lower(terms);
        }
        lower(&mut self.unit_words);
        lower(&mut self.currency_tokens);
        for c in &mut self.currency_symbols {
            c.code = c.code.trim().to_lowercase();
        }
        self
    }

    /// Topics that a lower-cased reference symbol refers to, strongest first.
    ///
    /// A topic whose key equals the symbol stripped to alphanumerics ranks
    /// first. The rest rank by the length of the longest synonym found inside
    /// the symbol, table order breaking ties. A currency pair such as
    /// `gbpusd` never fires a topic through a bare code (see
    /// [`is_bare_code`](Self::is_bare_code)), since that code names only one
    /// half of the pair.
    pub fn topics_for(&self, symbol: &str) -> Vec<&SynonymTopic> {
        let compact: String = symbol.chars().filter(|c| c.is_alphanumeric()).collect();
        let is_pair = self.currency_pair(&compact).is_some();

        let mut ranked: Vec<(usize, &SynonymTopic)> = self
            .topics
            .iter()
            .filter_map(|t| {
                if t.key == compact {
                    return Some((usize::MAX, t));
                }
                t.synonyms
                    .iter()
                    .filter(|s| !(is_pair && self.is_bare_code(s)))
                    .filter(|s| symbol.contains(s.as_str()))
                    .map(|s| s.chars().count())
                    .max()
                    .map(|len| (len, t))
            })
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.into_iter().map(|(_, t)| t).collect()
    }

    /// Split a six-letter compact symbol such as `gbpusd` into two currency
    /// codes known to the table.
    pub fn currency_pair<'a>(&self, compact: &'a str) -> Option<(&'a str, &'a str)> {
        if compact.len() != 6 || !compact.is_ascii() {
            return None;
        }
        let (base, quote) = compact.split_at(3);
        (self.is_bare_code(base) && self.is_bare_code(quote)).then_some((base, quote))
    }

    /// A currency glyph (`$`) or a code of at most three characters (`usd`).
    pub fn is_bare_code(&self, term: &str) -> bool {
        self.currency_symbols.iter().any(|c| c.symbol == term)
            || (term.chars().count() <= 3
                && (self.currency_tokens.iter().any(|t| t == term)
                    || self.currency_symbols.iter().any(|c| c.code == term)))
    }

    /// All keyword terms across every group.
    pub fn keyword_terms(&self) -> impl Iterator<Item = &str> {
        self.keyword_groups.values().flatten().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_lower_case() {
        let table = SynonymTable::default();
        assert_eq!(table.clone().normalized(), table);
    }

    #[test]
    fn test_topic_by_compact_key() {
        let table = SynonymTable::default();
        let keys: Vec<&str> = table.topics_for("usd-try").iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys.first(), Some(&"usdtry"));
    }

    #[test]
    fn test_topic_by_synonym() {
        let table = SynonymTable::default();
        let keys: Vec<&str> = table
            .topics_for("baltic dry index")
            .iter()
            .map(|t| t.key.as_str())
            .collect();
        assert_eq!(keys, vec!["bdi"]);
    }

    #[test]
    fn test_unknown_symbol_has_no_topic() {
        let table = SynonymTable::default();
        assert!(table.topics_for("xyz-unknown").is_empty());
    }

    #[test]
    fn test_longer_synonym_ranks_first() {
        let table = SynonymTable::default();
        // "usd" (usdtry) and "eur/usd" (eurusd) both occur; the longer wins
        let keys: Vec<&str> = table.topics_for("eur/usd spot").iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys.first(), Some(&"eurusd"));
    }

    #[test]
    fn test_pair_ignores_single_codes() {
        let table = SynonymTable::default();
        assert_eq!(table.currency_pair("gbpusd"), Some(("gbp", "usd")));
        assert!(table.topics_for("gbpusd").is_empty());
        let keys: Vec<&str> = table.topics_for("eurusd").iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["eurusd"]);
    }

    #[test]
    fn test_currency_pair_needs_known_codes() {
        let table = SynonymTable::default();
        assert_eq!(table.currency_pair("silver"), None);
        assert_eq!(table.currency_pair("usdtr"), None);
        assert!(table.is_bare_code("$"));
        assert!(!table.is_bare_code("dolar"));
    }

    #[test]
    fn test_from_json_lowercases() {
        let json = r#"{
            "topics": [{"key": "LNG", "synonyms": ["LNG", " Sıvılaştırılmış Gaz "]}],
            "keyword_groups": {"energy": ["LNG"]},
            "unit_words": ["MMBtu"],
            "currency_tokens": ["USD"],
            "currency_symbols": [{"symbol": "$", "code": "USD"}]
        }"#;
        let table = SynonymTable::from_json_str(json).unwrap();
        assert_eq!(table.topics[0].key, "lng");
        assert_eq!(table.topics[0].synonyms[1], "sıvılaştırılmış gaz");
        assert_eq!(table.unit_words, vec!["mmbtu"]);
        assert_eq!(table.currency_symbols[0].code, "usd");
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = SynonymTable::from_json_str("{\"topics\": 3}").unwrap_err();
        assert!(matches!(err, DomainError::Config(_)));
    }
}
