pub mod embed_repository;
pub mod market_data_store;
pub mod match_strategy;
pub mod sync_log_sink;
