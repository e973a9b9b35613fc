// orchestrator.rs
use crate::config::EnrichConfig;
use crate::domain::{score_location, LocationInputs, PropertyRecord, SourceRow};
use crate::errors::Result;
use crate::features::KeywordFeatures;
use crate::geo::estimators::{
    estimate_demographics, estimate_school_ratings, estimate_transit, estimate_walk_score,
};
use crate::geo::{geocode_address, Geocoder, NearbyPlaces};
use crate::pipeline::report::EnrichmentReport;
use crate::scraper::{extract_description, PageFetcher};
use std::time::Duration;
use tracing::info;

/// Inserts the fixed delay between records.
pub trait Pacer {
    fn pause(&self, delay: Duration);
}

pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// External capabilities the pipeline calls out to.
pub struct Services<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub geocoder: &'a dyn Geocoder,
    /// `None` when no places credential is configured.
    pub places: Option<&'a dyn NearbyPlaces>,
    pub pacer: &'a dyn Pacer,
}

/// Description stage: scrape the detail page (if any) and derive keyword flags.
pub fn enrich_description(record: &mut PropertyRecord, services: &Services<'_>, config: &EnrichConfig) {
    if let Some(url) = record.details_link.as_deref() {
        let outcome = extract_description(services.fetcher, url, &config.fetch);
        record.keywords = KeywordFeatures::from_outcome(&outcome);
        record.description = Some(outcome);
    }
}

/// Location stage: geocode, then run every regional estimator.
pub fn enrich_location(record: &mut PropertyRecord, services: &Services<'_>, config: &EnrichConfig) {
    let at = geocode_address(services.geocoder, &record.address, config.geocode_timeout);

    record.coordinates = at;
    record.walk_score = Some(estimate_walk_score(&record.address));
    record.schools = estimate_school_ratings(at);
    record.transit = Some(estimate_transit(at, services.places, config.places_timeout));
    record.demographics = estimate_demographics(at);
}

pub fn enrich_score(record: &mut PropertyRecord) {
    record.location = Some(score_location(&LocationInputs::from_record(record)));
}

/// Runs every stage for one listing.
pub fn enrich_record(row: SourceRow, services: &Services<'_>, config: &EnrichConfig) -> PropertyRecord {
    let mut record = PropertyRecord::from_source(row);
    enrich_description(&mut record, services, config);
    enrich_location(&mut record, services, config);
    enrich_score(&mut record);
    record
}

/// Enriches `rows` one after another, handing each finished record to
/// `on_record`. Sleeps `config.pacing_delay` between records, not after the
/// last. An error from `on_record` stops the batch.
pub fn enrich_all<F>(
    rows: Vec<SourceRow>,
    services: &Services<'_>,
    config: &EnrichConfig,
    mut on_record: F,
) -> Result<EnrichmentReport>
where
    F: FnMut(&PropertyRecord) -> Result<()>,
{
    let total = rows.len();
    let mut report = EnrichmentReport::default();

    info!(total, "Enriching properties");

    for (i, row) in rows.into_iter().enumerate() {
        info!(
            "Processing {}/{}: {}",
            i + 1,
            total,
            if row.address.is_empty() { "Unknown Address" } else { row.address.as_str() }
        );

        let record = enrich_record(row, services, config);
        report.record(&record);
        on_record(&record)?;

        if config.progress_every > 0 && (i + 1) % config.progress_every == 0 {
            info!("Processed {} properties...", i + 1);
        }

        if i + 1 < total {
            services.pacer.pause(config.pacing_delay);
        }
    }

    Ok(report)
}
