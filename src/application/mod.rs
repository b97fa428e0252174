pub mod candidates;
pub mod config;
pub mod matching;
pub mod merge;
pub mod sync;
