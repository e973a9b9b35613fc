pub mod cleaner;
pub mod description;
pub mod fetcher;
mod scraper_error;
pub mod selectors;

pub use description::{extract_description, DescriptionOutcome};
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use scraper_error::ScraperError;
