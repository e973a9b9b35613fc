pub mod orchestrator;
pub mod report;

pub use orchestrator::{enrich_all, Services, ThreadPacer};
