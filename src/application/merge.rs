//! Build the catalog record to upsert for each kind of embed hint.
//!
//! Every builder is pure and independent: one hint in, one record (or a
//! [`DomainError::Merge`]) out. There is no read-modify-write spanning
//! several hints.

use chrono::{DateTime, Utc};

use crate::application::config::SyncConfig;
use crate::domain::entities::embed::{EmbedCurrencyRate, EmbedFuelPrice, EmbedMarketItem};
use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::error::DomainError;
use crate::domain::values::category::MarketCategory;
use crate::domain::values::trend::Trend;

fn require_finite(label: &str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::Merge(format!("{label} is not a finite number")))
    }
}

/// `change / base * 100` with one decimal and an explicit sign, e.g. `+1.5%`.
pub fn format_change_percent(change: f64, base: f64) -> Result<String, DomainError> {
    if base == 0.0 {
        return Err(DomainError::Merge(
            "cannot derive change percent from a zero base".to_string(),
        ));
    }
    let pct = require_finite("change percent", change / base * 100.0)?;
    Ok(format!("{pct:+.1}%"))
}

/// Lower-cased, whitespace collapsed to single hyphens.
pub fn slug(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Overwrite a matched catalog item with the values carried by an embed.
///
/// `value` falls back to the item's current value when the embed has none.
pub fn merge_market_item(
    existing: &CanonicalMarketItem,
    hint: &EmbedMarketItem,
    now: DateTime<Utc>,
    config: &SyncConfig,
) -> Result<CanonicalMarketItem, DomainError> {
    let value = match hint.value {
        Some(v) => require_finite("value", v)?.to_string(),
        None => existing.value.clone(),
    };
    let change = require_finite("change", hint.change)?;

    Ok(CanonicalMarketItem {
        value,
        change,
        change_percent: hint.change_percent.clone(),
        last_update: hint.timestamp.unwrap_or(now),
        source: config.source_label.clone(),
        ..existing.clone()
    }
    .with_derived_trend())
}

/// Build a full currency record keyed `from-to`.
pub fn merge_currency_rate(
    rate: &EmbedCurrencyRate,
    now: DateTime<Utc>,
    config: &SyncConfig,
) -> Result<CanonicalMarketItem, DomainError> {
    let from = rate.from.trim();
    let to = rate.to.trim();
    if from.is_empty() || to.is_empty() {
        return Err(DomainError::Merge("currency pair is incomplete".to_string()));
    }
    let value = require_finite("rate", rate.rate)?;
    let change = require_finite("change", rate.change)?;

    Ok(CanonicalMarketItem {
        id: format!("{}-{}", from.to_lowercase(), to.to_lowercase()),
        display_name: format!("{}/{}", from.to_uppercase(), to.to_uppercase()),
        category: MarketCategory::Currency,
        value: format!("{value:.4}"),
        change,
        change_percent: format_change_percent(change, value)?,
        unit: to.to_string(),
        last_update: now,
        trend: Trend::from_change(change),
        source: config.source_label.clone(),
        description: None,
    })
}

/// Build a full fuel record keyed by the hyphenated fuel type.
pub fn merge_fuel_price(
    fuel: &EmbedFuelPrice,
    now: DateTime<Utc>,
    config: &SyncConfig,
) -> Result<CanonicalMarketItem, DomainError> {
    let id = slug(&fuel.fuel_type);
    if id.is_empty() {
        return Err(DomainError::Merge("fuel type is empty".to_string()));
    }
    let price = require_finite("price", fuel.price)?;
    let change = require_finite("change", fuel.change)?;

    Ok(CanonicalMarketItem {
        id,
        display_name: fuel.fuel_type.trim().to_string(),
        category: MarketCategory::Fuel,
        value: format!("${price:.2}"),
        change,
        change_percent: format_change_percent(change, price)?,
        unit: fuel
            .unit
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(config.default_fuel_unit.as_str())
            .to_string(),
        last_update: now,
        trend: Trend::from_change(change),
        source: config.source_label.clone(),
        description: None,
    })
}
