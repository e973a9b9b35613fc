// geocoder.rs
use crate::geo::regions::Coordinates;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const GEOCODER_USER_AGENT: &str = "real_estate_analyzer";

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Geocoding timed out: {0}")]
    Timeout(String),
    #[error("Geocoding request failed: {0}")]
    Request(String),
    #[error("Invalid geocoding response: {0}")]
    Response(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeocodeError::Timeout(e.to_string())
        } else {
            GeocodeError::Request(e.to_string())
        }
    }
}

/// Capability turning address text into coordinates. `Ok(None)` means the
/// service answered but knows no such place.
pub trait Geocoder {
    fn geocode(&self, address: &str, timeout: Duration)
        -> Result<Option<Coordinates>, GeocodeError>;
}

/// Best-effort geocoding. Timeouts and failures are logged and yield `None`.
pub fn geocode_address(
    geocoder: &dyn Geocoder,
    address: &str,
    timeout: Duration,
) -> Option<Coordinates> {
    let address = address.trim();
    if address.is_empty() {
        return None;
    }

    match geocoder.geocode(address, timeout) {
        Ok(Some(at)) => {
            debug!(address = %address, lat = at.latitude, lon = at.longitude, "Geocoded");
            Some(at)
        }
        Ok(None) => {
            debug!(address = %address, "No geocoding match");
            None
        }
        Err(GeocodeError::Timeout(_)) => {
            warn!(address = %address, "Geocoding timeout");
            None
        }
        Err(e) => {
            error!(address = %address, error = %e, "Geocoding error");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// OpenStreetMap Nominatim search, first result only.
pub struct NominatimGeocoder {
    client: Client,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .build()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(
        &self,
        address: &str,
        timeout: Duration,
    ) -> Result<Option<Coordinates>, GeocodeError> {
        let resp = self
            .client
            .get(NOMINATIM_SEARCH_URL)
            .header(USER_AGENT, GEOCODER_USER_AGENT)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .timeout(timeout)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GeocodeError::Request(format!("HTTP {status}")));
        }

        let text = resp.text()?;
        parse_nominatim_response(&text)
    }
}

fn parse_nominatim_response(text: &str) -> Result<Option<Coordinates>, GeocodeError> {
    let results: Vec<NominatimResult> =
        serde_json::from_str(text).map_err(|e| GeocodeError::Response(e.to_string()))?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let latitude: f64 = first
        .lat
        .parse()
        .map_err(|e| GeocodeError::Response(format!("Invalid latitude: {e}")))?;
    let longitude: f64 = first
        .lon
        .parse()
        .map_err(|e| GeocodeError::Response(format!("Invalid longitude: {e}")))?;

    Ok(Some(Coordinates::new(latitude, longitude)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::capture_logs;
    use std::cell::RefCell;

    struct FakeGeocoder {
        result: fn() -> Result<Option<Coordinates>, GeocodeError>,
        seen: RefCell<Vec<String>>,
    }

    impl Geocoder for FakeGeocoder {
        fn geocode(
            &self,
            address: &str,
            _timeout: Duration,
        ) -> Result<Option<Coordinates>, GeocodeError> {
            self.seen.borrow_mut().push(address.to_string());
            (self.result)()
        }
    }

    fn fake(result: fn() -> Result<Option<Coordinates>, GeocodeError>) -> FakeGeocoder {
        FakeGeocoder {
            result,
            seen: RefCell::new(Vec::new()),
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn match_returns_coordinates() {
        let geocoder = fake(|| Ok(Some(Coordinates::new(37.44, -122.16))));
        assert_eq!(
            geocode_address(&geocoder, " 1 Main St ", TIMEOUT),
            Some(Coordinates::new(37.44, -122.16))
        );
        assert_eq!(geocoder.seen.borrow().as_slice(), ["1 Main St"]);
    }

    #[test]
    fn failures_become_unknown() {
        let no_match = fake(|| Ok(None));
        assert_eq!(geocode_address(&no_match, "nowhere", TIMEOUT), None);

        let timeout = fake(|| Err(GeocodeError::Timeout("10s".into())));
        assert_eq!(geocode_address(&timeout, "1 Main St", TIMEOUT), None);

        let broken = fake(|| Err(GeocodeError::Request("connection refused".into())));
        assert_eq!(geocode_address(&broken, "1 Main St", TIMEOUT), None);
    }

    #[test]
    fn timeout_warns_and_other_failures_log_errors() {
        let timeout = fake(|| Err(GeocodeError::Timeout("10s".into())));
        let (at, logs) = capture_logs(|| geocode_address(&timeout, "1 Main St", TIMEOUT));
        assert_eq!(at, None);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("Geocoding timeout"), "{logs}");
        assert!(!logs.contains("ERROR"), "{logs}");

        let broken = fake(|| Err(GeocodeError::Request("connection refused".into())));
        let (at, logs) = capture_logs(|| geocode_address(&broken, "1 Main St", TIMEOUT));
        assert_eq!(at, None);
        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("connection refused"), "{logs}");
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn blank_address_is_not_sent() {
        let geocoder = fake(|| Ok(Some(Coordinates::new(0.0, 0.0))));
        assert_eq!(geocode_address(&geocoder, "   ", TIMEOUT), None);
        assert!(geocoder.seen.borrow().is_empty());
    }

    #[test]
    fn parses_first_nominatim_result() {
        let json = r#"[{"lat":"37.4443","lon":"-122.1598","display_name":"Palo Alto"},{"lat":"1","lon":"2"}]"#;
        assert_eq!(
            parse_nominatim_response(json).unwrap(),
            Some(Coordinates::new(37.4443, -122.1598))
        );
        assert_eq!(parse_nominatim_response("[]").unwrap(), None);
        assert!(parse_nominatim_response(r#"[{"lat":"north","lon":"1"}]"#).is_err());
    }
}
