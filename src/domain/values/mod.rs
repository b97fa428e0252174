pub mod category;
pub mod numeric;
pub mod signals;
pub mod similarity;
pub mod synonyms;
pub mod trend;
