// estimators.rs
//! Heuristic location features. Every estimator is total: missing input
//! produces unknown values or a documented default, never an error.

use crate::geo::places::{NearbyPlaces, TRANSIT_CATEGORY, TRANSIT_SEARCH_RADIUS_M};
use crate::geo::regions::{BoundingBox, Coordinates, RegionPredicate, RegionRule, RegionRuleTable};
use std::time::Duration;
use tracing::{debug, error};

/// Greater San Francisco Bay Area.
pub const BAY_AREA: BoundingBox = BoundingBox::new(37.3, 37.8, -122.5, -121.8);
const EAST_BAY: BoundingBox = BAY_AREA.longitude_band(-122.2, -121.9);
const PENINSULA: BoundingBox = BAY_AREA.longitude_band(-122.3, -122.1);

// ---- Walkability ----

pub const DEFAULT_WALK_SCORE: u8 = 45;

pub static WALKABILITY_RULES: RegionRuleTable<u8> = RegionRuleTable {
    rules: &[
        RegionRule {
            name: "urban core",
            predicate: RegionPredicate::AddressMentions(&[
                "san francisco",
                "downtown",
                "manhattan",
                "brooklyn",
                "boston",
                "washington dc",
                "chicago loop",
            ]),
            output: 85,
        },
        RegionRule {
            name: "inner suburb",
            predicate: RegionPredicate::AddressMentions(&[
                "palo alto",
                "mountain view",
                "cupertino",
                "sunnyvale",
                "redwood city",
                "menlo park",
                "berkeley",
                "oakland",
            ]),
            output: 65,
        },
        RegionRule {
            name: "outer suburb",
            predicate: RegionPredicate::AddressMentions(&[
                "fremont",
                "hayward",
                "san mateo",
                "milpitas",
            ]),
            output: 55,
        },
    ],
    default: DEFAULT_WALK_SCORE,
};

/// Walk score from the city named in the address. Coordinates are not used.
pub fn estimate_walk_score(address: &str) -> u8 {
    *WALKABILITY_RULES.evaluate(None, address)
}

// ---- Schools ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolProfile {
    pub elementary: u8,
    pub middle: u8,
    pub high: u8,
    pub district: &'static str,
}

pub static SCHOOL_RULES: RegionRuleTable<SchoolProfile> = RegionRuleTable {
    rules: &[
        RegionRule {
            name: "east bay",
            predicate: RegionPredicate::Within(EAST_BAY),
            output: SchoolProfile {
                elementary: 7,
                middle: 7,
                high: 6,
                district: "East Bay Unified",
            },
        },
        RegionRule {
            name: "peninsula",
            predicate: RegionPredicate::Within(PENINSULA),
            output: SchoolProfile {
                elementary: 8,
                middle: 8,
                high: 8,
                district: "Peninsula Schools",
            },
        },
        RegionRule {
            name: "bay area",
            predicate: RegionPredicate::Within(BAY_AREA),
            output: SchoolProfile {
                elementary: 6,
                middle: 6,
                high: 7,
                district: "Bay Area Schools",
            },
        },
    ],
    default: SchoolProfile {
        elementary: 6,
        middle: 6,
        high: 6,
        district: "Local District",
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolRatings {
    pub elementary: Option<u8>,
    pub middle: Option<u8>,
    pub high: Option<u8>,
    pub district: Option<String>,
}

impl From<&SchoolProfile> for SchoolRatings {
    fn from(p: &SchoolProfile) -> Self {
        Self {
            elementary: Some(p.elementary),
            middle: Some(p.middle),
            high: Some(p.high),
            district: Some(p.district.to_string()),
        }
    }
}

pub fn estimate_school_ratings(at: Option<Coordinates>) -> SchoolRatings {
    match at {
        Some(c) => SchoolRatings::from(SCHOOL_RULES.evaluate(Some(c), "")),
        None => SchoolRatings::default(),
    }
}

// ---- Transit ----

#[derive(Debug, Clone, PartialEq)]
pub struct TransitEstimate {
    pub distance_km: f64,
    pub transit_type: String,
    pub score: u8,
}

impl TransitEstimate {
    /// Used when no places service is configured, or it fails.
    pub fn estimated() -> Self {
        Self {
            distance_km: 0.8,
            transit_type: "Bus".to_string(),
            score: 60,
        }
    }

    /// Representative values once a station is known to be nearby.
    pub fn station_found() -> Self {
        Self {
            distance_km: 0.5,
            transit_type: "Transit Station".to_string(),
            score: 80,
        }
    }
}

/// Transit access near `at`. Only asks `places` whether a station exists within
/// the search radius; no real distance is computed.
pub fn estimate_transit(
    at: Option<Coordinates>,
    places: Option<&dyn NearbyPlaces>,
    timeout: Duration,
) -> TransitEstimate {
    let (Some(at), Some(places)) = (at, places) else {
        return TransitEstimate::estimated();
    };

    match places.nearby(at, TRANSIT_SEARCH_RADIUS_M, TRANSIT_CATEGORY, timeout) {
        Ok(found) if !found.is_empty() => {
            debug!(station = %found[0].name, "Transit station found");
            TransitEstimate::station_found()
        }
        Ok(_) => TransitEstimate::estimated(),
        Err(e) => {
            error!(error = %e, "Transit data error");
            TransitEstimate::estimated()
        }
    }
}

// ---- Demographics ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemographicProfile {
    pub median_household_income: u32,
    pub population_density: u32,
    /// Lower is safer.
    pub crime_index: u32,
    pub area_type: &'static str,
}

pub static DEMOGRAPHIC_RULES: RegionRuleTable<DemographicProfile> = RegionRuleTable {
    rules: &[
        RegionRule {
            name: "peninsula",
            predicate: RegionPredicate::Within(PENINSULA),
            output: DemographicProfile {
                median_household_income: 150_000,
                population_density: 3000,
                crime_index: 25,
                area_type: "Affluent Suburban",
            },
        },
        RegionRule {
            name: "bay area",
            predicate: RegionPredicate::Within(BAY_AREA),
            output: DemographicProfile {
                median_household_income: 100_000,
                population_density: 2500,
                crime_index: 35,
                area_type: "Suburban",
            },
        },
    ],
    default: DemographicProfile {
        median_household_income: 80_000,
        population_density: 1500,
        crime_index: 45,
        area_type: "Mixed",
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
    pub median_household_income: Option<u32>,
    pub population_density: Option<u32>,
    pub crime_index: Option<u32>,
    pub area_type: Option<String>,
}

impl From<&DemographicProfile> for Demographics {
    fn from(p: &DemographicProfile) -> Self {
        Self {
            median_household_income: Some(p.median_household_income),
            population_density: Some(p.population_density),
            crime_index: Some(p.crime_index),
            area_type: Some(p.area_type.to_string()),
        }
    }
}

pub fn estimate_demographics(at: Option<Coordinates>) -> Demographics {
    match at {
        Some(c) => Demographics::from(DEMOGRAPHIC_RULES.evaluate(Some(c), "")),
        None => Demographics::default(),
    }
}
