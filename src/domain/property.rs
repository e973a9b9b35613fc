// src/domain/property.rs

use crate::domain::scoring::LocationScore;
use crate::features::KeywordFeatures;
use crate::geo::{Coordinates, Demographics, SchoolRatings, TransitEstimate};
use crate::scraper::DescriptionOutcome;

/// One listing as read from the source table, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub id: i64,
    pub address: String,
    pub details_link: Option<String>,
}

impl SourceRow {
    /// Blank values are normalized to empty address / no link.
    pub fn new(id: i64, address: Option<String>, details_link: Option<String>) -> Self {
        let address = address.map(|a| a.trim().to_string()).unwrap_or_default();
        let details_link = details_link
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        Self {
            id,
            address,
            details_link,
        }
    }
}

/// A listing plus everything derived for it. Created from a [`SourceRow`] with
/// every derived field unknown; each pipeline stage fills in its own fields.
/// `None` always means "not computed", never zero or false.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    pub id: i64,
    pub address: String,
    pub details_link: Option<String>,

    // Description stage
    /// `None` when the listing has no detail link to scrape.
    pub description: Option<DescriptionOutcome>,
    pub keywords: KeywordFeatures,

    // Location stage
    pub coordinates: Option<Coordinates>,
    pub walk_score: Option<u8>,
    pub schools: SchoolRatings,
    pub transit: Option<TransitEstimate>,
    pub demographics: Demographics,

    // Scoring stage
    pub location: Option<LocationScore>,
}

impl PropertyRecord {
    pub fn from_source(row: SourceRow) -> Self {
        Self {
            id: row.id,
            address: row.address,
            details_link: row.details_link,
            description: None,
            keywords: KeywordFeatures::default(),
            coordinates: None,
            walk_score: None,
            schools: SchoolRatings::default(),
            transit: None,
            demographics: Demographics::default(),
            location: None,
        }
    }

    /// Description column value: scraped text, a sentinel, or empty when never scraped.
    pub fn description_text(&self) -> &str {
        self.description
            .as_ref()
            .map(DescriptionOutcome::as_text)
            .unwrap_or("")
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_row_normalizes_blanks() {
        let row = SourceRow::new(7, Some("  1 Main St ".into()), Some("   ".into()));
        assert_eq!(row.address, "1 Main St");
        assert_eq!(row.details_link, None);

        let row = SourceRow::new(8, None, Some(" https://example.com/a ".into()));
        assert_eq!(row.address, "");
        assert_eq!(row.details_link.as_deref(), Some("https://example.com/a"));
    }

    #[test]
    fn new_record_has_everything_unknown() {
        let record = PropertyRecord::from_source(SourceRow::new(1, Some("x".into()), None));
        assert!(record.description.is_none());
        assert_eq!(record.description_text(), "");
        assert_eq!(record.keywords, KeywordFeatures::default());
        assert!(record.latitude().is_none() && record.longitude().is_none());
        assert!(record.walk_score.is_none());
        assert_eq!(record.schools, SchoolRatings::default());
        assert!(record.transit.is_none());
        assert_eq!(record.demographics, Demographics::default());
        assert!(record.location.is_none());
    }

    #[test]
    fn description_text_uses_sentinels() {
        let mut record = PropertyRecord::from_source(SourceRow::new(1, None, None));
        record.description = Some(DescriptionOutcome::NotFound);
        assert_eq!(record.description_text(), "No description found");
        record.description = Some(DescriptionOutcome::Failed("boom".into()));
        assert_eq!(record.description_text(), "Error extracting description");
    }
}
