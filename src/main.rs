use crate::config::{EnrichConfig, FetchConfig, DEFAULT_USER_AGENT};
use crate::db::listings::{load_source_rows, SourceTable};
use crate::db::{enriched, init_db, runs, Database};
use crate::errors::{EnrichError, Result};
use crate::geo::{GooglePlacesClient, NearbyPlaces, NominatimGeocoder};
use crate::pipeline::{enrich_all, Services, ThreadPacer};
use crate::scraper::HttpPageFetcher;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

mod config;
mod db;
mod domain;
mod errors;
mod features;
mod geo;
mod pipeline;
mod scraper;
mod spreadsheets;

#[cfg(test)]
mod tests;

/// Adds scraped description keywords and estimated location features to a
/// table of real-estate listings.
#[derive(Parser, Debug)]
#[command(name = "listing_enricher")]
#[command(version)]
struct Args {
    /// SQLite database holding the source listings
    #[arg(long)]
    input: PathBuf,

    /// Source table name
    #[arg(long, default_value = "listings")]
    table: String,

    #[arg(long, default_value = "Address")]
    address_column: String,

    #[arg(long, default_value = "Details Link")]
    link_column: String,

    /// Database receiving enriched_listings (defaults to the input database)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the enriched records to this .xlsx file
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Only process the first N listings
    #[arg(long)]
    limit: Option<usize>,

    /// Pause between listings, in seconds
    #[arg(long, default_value_t = 2.0)]
    delay_secs: f64,

    /// Timeout for each remote call, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Google Places key for transit lookups; transit is estimated without it
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    places_api_key: Option<String>,
}

impl Args {
    fn enrich_config(&self) -> Result<EnrichConfig> {
        let pacing_delay = Duration::try_from_secs_f64(self.delay_secs)
            .map_err(|e| EnrichError::Config(format!("invalid --delay-secs: {e}")))?;
        let timeout = Duration::from_secs(self.timeout_secs);

        Ok(EnrichConfig {
            fetch: FetchConfig {
                timeout,
                user_agent: self.user_agent.clone(),
            },
            geocode_timeout: timeout,
            places_timeout: timeout,
            pacing_delay,
            ..EnrichConfig::default()
        }
        .with_places_api_key(self.places_api_key.clone()))
    }
}

fn now_unix() -> i64 {
    Utc::now().timestamp()
}

fn run(args: Args) -> Result<()> {
    let config = args.enrich_config()?;

    let input = Database::new(args.input.to_string_lossy());
    let output = Database::new(
        args.output
            .as_ref()
            .unwrap_or(&args.input)
            .to_string_lossy(),
    );

    let source = SourceTable {
        table: args.table.clone(),
        address_column: args.address_column.clone(),
        link_column: args.link_column.clone(),
    };

    // Schema problems abort here, before any record is touched.
    let rows = load_source_rows(&input, &source, args.limit)?;
    info!(count = rows.len(), table = %source.table, "Loaded source listings");
    if rows.is_empty() {
        info!("No properties to enrich");
        return Ok(());
    }

    init_db(&output)?;
    if let Some(last) = output.with_conn(|conn| runs::get_recent_runs(conn))?.first() {
        info!(
            run_id = last.id,
            table = %last.source_table,
            started_at = last.started_at,
            finished_at = ?last.finished_at,
            success = last.success,
            records = last.records_processed.unwrap_or(0),
            error = last.error_message.as_deref().unwrap_or(""),
            "Previous enrichment run"
        );
    }

    let fetcher = HttpPageFetcher::new()?;
    let geocoder = NominatimGeocoder::new()
        .map_err(|e| EnrichError::Config(format!("geocoder: {e}")))?;
    let places = match &config.places_api_key {
        Some(key) => Some(
            GooglePlacesClient::new(key.clone())
                .map_err(|e| EnrichError::Config(format!("places client: {e}")))?,
        ),
        None => {
            info!("No places API key configured; transit access will be estimated");
            None
        }
    };

    let services = Services {
        fetcher: &fetcher,
        geocoder: &geocoder,
        places: places.as_ref().map(|p| p as &dyn NearbyPlaces),
        pacer: &ThreadPacer,
    };

    let run_id = output.with_conn(|conn| runs::start_enrichment_run(conn, &source.table, now_unix()))?;

    let mut done = Vec::with_capacity(rows.len());
    let result = enrich_all(rows, &services, &config, |record| {
        enriched::save_enriched_record(&output, record, Some(run_id))?;
        done.push(record.clone());
        Ok(())
    });

    let (success, error_message) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };
    output.with_conn(|conn| {
        runs::end_enrichment_run(conn, run_id, now_unix(), done.len(), success, error_message)
    })?;

    let report = result?;
    report.log_summary();

    if let Some(path) = &args.xlsx {
        spreadsheets::export_enriched_xlsx(&done, path)?;
        info!(path = %path.display(), "Saved enriched spreadsheet");
    }

    info!(
        records = done.len(),
        stored = enriched::count_enriched(&output)?,
        "Enrichment complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "listing_enricher=info".into()),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Enrichment failed");
            ExitCode::FAILURE
        }
    }
}
