// report.rs
use crate::domain::{LocationCategory, PropertyRecord};
use crate::features::KeywordCategory;
use crate::scraper::DescriptionOutcome;
use tracing::info;

/// Running count and sum for a numeric column, skipping unknowns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnStats {
    pub valid: usize,
    pub sum: f64,
}

impl ColumnStats {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.valid += 1;
            self.sum += v;
        }
    }

    pub fn mean(&self) -> Option<f64> {
        (self.valid > 0).then(|| self.sum / self.valid as f64)
    }
}

/// Batch statistics, accumulated record by record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentReport {
    pub total: usize,

    pub descriptions_found: usize,
    pub descriptions_missing: usize,
    pub descriptions_failed: usize,
    pub without_link: usize,
    /// Hits per category, indexed like [`KeywordCategory::ALL`].
    pub keyword_hits: [usize; 6],

    pub geocoded: usize,
    pub walk_score: ColumnStats,
    pub distance_to_transit: ColumnStats,
    pub public_transit_score: ColumnStats,
    pub elementary_rating: ColumnStats,
    pub location_score: ColumnStats,
    /// Indexed like [`LocationCategory::ALL`].
    pub categories: [usize; 3],
}

impl EnrichmentReport {
    pub fn record(&mut self, record: &PropertyRecord) {
        self.total += 1;

        match &record.description {
            Some(DescriptionOutcome::Found(_)) => self.descriptions_found += 1,
            Some(DescriptionOutcome::NotFound) => self.descriptions_missing += 1,
            Some(DescriptionOutcome::Failed(_)) => self.descriptions_failed += 1,
            None => self.without_link += 1,
        }

        for (i, category) in KeywordCategory::ALL.iter().enumerate() {
            self.keyword_hits[i] += usize::from(record.keywords.get(*category));
        }

        if record.coordinates.is_some() {
            self.geocoded += 1;
        }

        let transit = record.transit.as_ref();
        self.walk_score.add(record.walk_score.map(f64::from));
        self.distance_to_transit.add(transit.map(|t| t.distance_km));
        self.public_transit_score.add(transit.map(|t| f64::from(t.score)));
        self.elementary_rating.add(record.schools.elementary.map(f64::from));
        self.location_score
            .add(record.location.map(|l| f64::from(l.score)));

        if let Some(location) = record.location {
            if let Some(i) = LocationCategory::ALL
                .iter()
                .position(|c| *c == location.category)
            {
                self.categories[i] += 1;
            }
        }
    }

    pub fn keyword_hits(&self, category: KeywordCategory) -> usize {
        KeywordCategory::ALL
            .iter()
            .position(|c| *c == category)
            .map_or(0, |i| self.keyword_hits[i])
    }

    pub fn category_count(&self, category: LocationCategory) -> usize {
        LocationCategory::ALL
            .iter()
            .position(|c| *c == category)
            .map_or(0, |i| self.categories[i])
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }

    pub fn log_summary(&self) {
        info!("=== Extraction Results ===");
        info!("Valid descriptions: {}", self.descriptions_found);
        info!("Missing descriptions: {}", self.descriptions_missing);
        info!("Error descriptions: {}", self.descriptions_failed);
        info!("Without detail link: {}", self.without_link);

        info!("=== Keyword Feature Stats ===");
        for category in KeywordCategory::ALL {
            let count = self.keyword_hits(category);
            info!(
                "{}: {}/{} ({:.1}%)",
                category.column_name(),
                count,
                self.total,
                self.percent(count)
            );
        }

        info!("=== Location Enhancement Results ===");
        info!("Successfully geocoded: {}/{} properties", self.geocoded, self.total);
        for (name, stats) in [
            ("walk_score", &self.walk_score),
            ("distance_to_transit", &self.distance_to_transit),
            ("public_transit_score", &self.public_transit_score),
            ("nearest_elementary_rating", &self.elementary_rating),
            ("location_score", &self.location_score),
        ] {
            if let Some(mean) = stats.mean() {
                info!("{}: {}/{} valid, avg: {:.1}", name, stats.valid, self.total, mean);
            }
        }
        for category in LocationCategory::ALL {
            info!("{}: {}", category.as_str(), self.category_count(category));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scoring::LocationScore;
    use crate::domain::SourceRow;
    use crate::features::KeywordFeatures;
    use crate::geo::{Coordinates, TransitEstimate};

    fn record(description: Option<DescriptionOutcome>) -> PropertyRecord {
        let mut r = PropertyRecord::from_source(SourceRow::new(1, Some("a".into()), None));
        r.keywords = description
            .as_ref()
            .map(KeywordFeatures::from_outcome)
            .unwrap_or_default();
        r.description = description;
        r
    }

    #[test]
    fn counts_description_outcomes() {
        let mut report = EnrichmentReport::default();
        report.record(&record(Some(DescriptionOutcome::Found(
            "Renovated bungalow with a garden".into(),
        ))));
        report.record(&record(Some(DescriptionOutcome::NotFound)));
        report.record(&record(Some(DescriptionOutcome::Failed("timeout".into()))));
        report.record(&record(None));

        assert_eq!(report.total, 4);
        assert_eq!(report.descriptions_found, 1);
        assert_eq!(report.descriptions_missing, 1);
        assert_eq!(report.descriptions_failed, 1);
        assert_eq!(report.without_link, 1);
        assert_eq!(report.keyword_hits(KeywordCategory::Renovation), 1);
        assert_eq!(report.keyword_hits(KeywordCategory::Outdoor), 1);
        assert_eq!(report.keyword_hits(KeywordCategory::Luxury), 0);
    }

    #[test]
    fn averages_skip_unknowns() {
        let mut report = EnrichmentReport::default();

        let mut located = record(None);
        located.coordinates = Some(Coordinates::new(37.5, -122.0));
        located.walk_score = Some(65);
        located.transit = Some(TransitEstimate::station_found());
        located.location = Some(LocationScore {
            score: 9,
            category: LocationCategory::Premium,
        });
        report.record(&located);

        let mut unlocated = record(None);
        unlocated.walk_score = Some(45);
        report.record(&unlocated);

        assert_eq!(report.geocoded, 1);
        assert_eq!(report.walk_score.mean(), Some(55.0));
        assert_eq!(report.distance_to_transit.valid, 1);
        assert_eq!(report.elementary_rating.mean(), None);
        assert_eq!(report.category_count(LocationCategory::Premium), 1);
        assert_eq!(report.category_count(LocationCategory::Basic), 0);
    }
}
