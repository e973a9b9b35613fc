// errors.rs
use thiserror::Error;

use crate::scraper::ScraperError;

/// Errors that abort a batch. Per-record network problems never end up here;
/// they are absorbed by the extractors and turned into unknown values.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The source table is missing, or lacks a column the pipeline needs.
    #[error("Schema violation: {0}")]
    Schema(String),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scraper error: {0}")]
    Scraper(#[from] ScraperError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, EnrichError>;
