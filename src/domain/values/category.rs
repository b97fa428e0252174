use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketCategory {
    Currency,
    Fuel,
    Freight,
    Commodity,
    Index,
}

impl MarketCategory {
    /// Categories that earn the candidate-scoring category bonus.
    pub fn is_bonus_category(&self) -> bool {
        matches!(
            self,
            MarketCategory::Currency | MarketCategory::Fuel | MarketCategory::Commodity
        )
    }
}

impl fmt::Display for MarketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketCategory::Currency => write!(f, "currency"),
            MarketCategory::Fuel => write!(f, "fuel"),
            MarketCategory::Freight => write!(f, "freight"),
            MarketCategory::Commodity => write!(f, "commodity"),
            MarketCategory::Index => write!(f, "index"),
        }
    }
}

impl FromStr for MarketCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "currency" => Ok(MarketCategory::Currency),
            "fuel" => Ok(MarketCategory::Fuel),
            "freight" => Ok(MarketCategory::Freight),
            "commodity" => Ok(MarketCategory::Commodity),
            "index" => Ok(MarketCategory::Index),
            _ => Err(format!("Unknown market category: {s}")),
        }
    }
}
