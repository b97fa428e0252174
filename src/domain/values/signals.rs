//! Keyword and number extraction from free text.
//!
//! Pure and deterministic: the same text and table always produce the same
//! [`Signals`]. The vocabulary comes entirely from a [`SynonymTable`].

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::error::DomainError;
use crate::domain::values::numeric::{extract_numbers, parse_decimal};
use crate::domain::values::synonyms::SynonymTable;

lazy_static! {
    /// Three-letter ratio such as `usd/try`, matched on lower-cased text.
    static ref RATIO_REGEX: Regex =
        Regex::new(r"\b([a-z]{3})/([a-z]{3})\b").expect("Invalid regex pattern");

    static ref DEFAULT_EXTRACTOR: SignalExtractor = SignalExtractor::new(&SynonymTable::default())
        .expect("Default synonym table compiles");
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signals {
    pub keywords: BTreeSet<String>,
    /// In order of appearance.
    pub numbers: Vec<f64>,
}

pub struct SignalExtractor {
    terms: Vec<String>,
    currency_symbols: Vec<(String, String)>,
    /// `<number><unit-word>` or `<number><currency-token>`.
    amount_regex: Option<Regex>,
}

impl SignalExtractor {
    pub fn new(table: &SynonymTable) -> Result<Self, DomainError> {
        let mut trailing: Vec<&str> = table
            .unit_words
            .iter()
            .chain(table.currency_tokens.iter())
            .map(String::as_str)
            .collect();
        trailing.sort_unstable();
        trailing.dedup();
        // Longest first so `litre` wins over `lt`.
        trailing.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

        let amount_regex = if trailing.is_empty() {
            None
        } else {
            let alternation = trailing
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(\d+(?:[.,]\d+)?)\s*({alternation})\b");
            Some(
                Regex::new(&pattern)
                    .map_err(|e| DomainError::Config(format!("Invalid unit pattern: {e}")))?,
            )
        };

        let mut terms: Vec<String> = table.keyword_terms().map(str::to_string).collect();
        terms.sort();
        terms.dedup();

        Ok(Self {
            terms,
            currency_symbols: table
                .currency_symbols
                .iter()
                .map(|c| (c.symbol.clone(), c.code.clone()))
                .collect(),
            amount_regex,
        })
    }

    pub fn extract(&self, text: &str) -> Signals {
        let lower = text.to_lowercase();
        let mut keywords = BTreeSet::new();

        for term in &self.terms {
            if lower.contains(term.as_str()) {
                keywords.insert(term.clone());
            }
        }

        for (symbol, code) in &self.currency_symbols {
            if lower.contains(symbol.as_str()) {
                keywords.insert(code.clone());
            }
        }

        for caps in RATIO_REGEX.captures_iter(&lower) {
            keywords.insert(caps[1].to_string());
            keywords.insert(caps[2].to_string());
            keywords.insert(caps[0].to_string());
        }

        if let Some(re) = &self.amount_regex {
            for caps in re.captures_iter(&lower) {
                if parse_decimal(&caps[1]).is_some() {
                    keywords.insert(caps[2].to_string());
                }
            }
        }

        Signals {
            keywords,
            numbers: extract_numbers(&lower),
        }
    }
}

/// Extract signals using the built-in vocabulary.
pub fn extract_signals(text: &str) -> Signals {
    DEFAULT_EXTRACTOR.extract(text)
}
