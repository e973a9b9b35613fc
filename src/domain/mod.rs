pub mod property;
pub mod scoring;

pub use property::{PropertyRecord, SourceRow};
pub use scoring::{score_location, LocationCategory, LocationInputs};
