pub mod embed;
pub mod market_item;
pub mod sync_result;
