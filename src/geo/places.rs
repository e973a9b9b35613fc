// places.rs
use crate::geo::regions::Coordinates;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

pub const TRANSIT_SEARCH_RADIUS_M: u32 = 2000;
pub const TRANSIT_CATEGORY: &str = "transit_station";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceResult {
    pub name: String,
}

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("Places request failed: {0}")]
    Request(String),
    #[error("Unexpected places response: {0}")]
    Response(String),
    #[error("Places API returned status {0}")]
    Status(String),
}

/// Capability for "what is near this point" lookups.
pub trait NearbyPlaces {
    fn nearby(
        &self,
        at: Coordinates,
        radius_m: u32,
        category: &str,
        timeout: Duration,
    ) -> Result<Vec<PlaceResult>, PlacesError>;
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbySearchResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResult {
    #[serde(default)]
    name: String,
}

/// Google Places nearby search.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .build()
            .map_err(|e| PlacesError::Request(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }
}

impl NearbyPlaces for GooglePlacesClient {
    fn nearby(
        &self,
        at: Coordinates,
        radius_m: u32,
        category: &str,
        timeout: Duration,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let location = format!("{},{}", at.latitude, at.longitude);
        let radius = radius_m.to_string();

        let resp = self
            .client
            .get(NEARBY_SEARCH_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", category),
            ])
            .timeout(timeout)
            .send()
            .map_err(|e| PlacesError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PlacesError::Request(format!("HTTP {status}")));
        }

        let text = resp
            .text()
            .map_err(|e| PlacesError::Response(e.to_string()))?;
        parse_nearby_response(&text)
    }
}

fn parse_nearby_response(text: &str) -> Result<Vec<PlaceResult>, PlacesError> {
    let data: NearbySearchResponse =
        serde_json::from_str(text).map_err(|e| PlacesError::Response(e.to_string()))?;

    match data.status.as_str() {
        "OK" | "ZERO_RESULTS" => Ok(data
            .results
            .into_iter()
            .map(|r| PlaceResult { name: r.name })
            .collect()),
        other => Err(PlacesError::Status(match data.error_message {
            Some(msg) => format!("{other}: {msg}"),
            None => other.to_string(),
        })),
    }
}
