pub mod keywords;

pub use keywords::{KeywordCategory, KeywordFeatures};
