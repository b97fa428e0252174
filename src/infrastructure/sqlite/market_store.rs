use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::entities::market_item::CanonicalMarketItem;
use crate::domain::error::DomainError;
use crate::domain::ports::market_data_store::MarketDataStore;
use crate::domain::values::category::MarketCategory;
use crate::domain::values::trend::Trend;
use crate::infrastructure::sqlite::parse_timestamp;

const SELECT_COLS: &str = "id, display_name, category, value, change, change_percent, unit, last_update, trend, source, description";

pub struct SqliteMarketStore {
    conn: Mutex<Connection>,
}

impl SqliteMarketStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_item(row: &rusqlite::Row) -> Result<CanonicalMarketItem, rusqlite::Error> {
        let category_str: String = row.get(2)?;
        let updated_str: String = row.get(7)?;
        let trend_str: String = row.get(8)?;
        let change: f64 = row.get(4)?;

        Ok(CanonicalMarketItem {
            id: row.get(0)?,
            display_name: row.get(1)?,
            category: category_str.parse().unwrap_or_else(|_| {
                tracing::warn!(category = %category_str, "Invalid category in market_items, defaulting to commodity");
                MarketCategory::Commodity
            }),
            value: row.get(3)?,
            change,
            change_percent: row.get(5)?,
            unit: row.get(6)?,
            last_update: parse_timestamp(&updated_str),
            trend: trend_str
                .parse()
                .unwrap_or_else(|_| Trend::from_change(change)),
            source: row.get(9)?,
            description: row.get(10)?,
        })
    }
}

#[async_trait]
impl MarketDataStore for SqliteMarketStore {
    async fn get_all(&self) -> Result<Vec<CanonicalMarketItem>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLS} FROM market_items ORDER BY category, id"
        ))?;
        let items = stmt
            .query_map([], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    async fn get(&self, id: &str) -> Result<Option<CanonicalMarketItem>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let item = conn
            .query_row(
                &format!("SELECT {SELECT_COLS} FROM market_items WHERE id = ?1"),
                params![id],
                Self::row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    async fn upsert(&self, items: &[CanonicalMarketItem]) -> Result<(), DomainError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        for item in items {
            tx.execute(
                "INSERT INTO market_items (id, display_name, category, value, change, change_percent, unit, last_update, trend, source, description)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                 ON CONFLICT(id) DO UPDATE SET
                    display_name = excluded.display_name,
                    category = excluded.category,
                    value = excluded.value,
                    change = excluded.change,
                    change_percent = excluded.change_percent,
                    unit = excluded.unit,
                    last_update = excluded.last_update,
                    trend = excluded.trend,
                    source = excluded.source,
                    description = excluded.description",
                params![
                    item.id,
                    item.display_name,
                    item.category.to_string(),
                    item.value,
                    item.change,
                    item.change_percent,
                    item.unit,
                    item.last_update.to_rfc3339(),
                    item.trend.to_string(),
                    item.source,
                    item.description,
                ],
            )
            .map_err(|e| DomainError::Persistence(format!("Failed to upsert {}: {e}", item.id)))?;
        }
        tx.commit()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(())
    }
}
