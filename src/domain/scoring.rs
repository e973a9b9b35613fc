// src/domain/scoring.rs

use crate::domain::property::PropertyRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationCategory {
    Premium,
    Average,
    Basic,
}

impl LocationCategory {
    pub const ALL: [LocationCategory; 3] = [
        LocationCategory::Premium,
        LocationCategory::Average,
        LocationCategory::Basic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LocationCategory::Premium => "Premium",
            LocationCategory::Average => "Average",
            LocationCategory::Basic => "Basic",
        }
    }

    /// Premium at 8 and above, Basic at 3 and below.
    pub fn from_score(score: u8) -> Self {
        if score >= 8 {
            LocationCategory::Premium
        } else if score <= 3 {
            LocationCategory::Basic
        } else {
            LocationCategory::Average
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationScore {
    pub score: u8,
    pub category: LocationCategory,
}

/// The factors the composite score looks at. Any of them may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocationInputs {
    pub walk_score: Option<u8>,
    pub elementary_rating: Option<u8>,
    pub middle_rating: Option<u8>,
    pub high_rating: Option<u8>,
    pub crime_index: Option<u32>,
    pub transit_distance_km: Option<f64>,
}

impl LocationInputs {
    pub fn from_record(record: &PropertyRecord) -> Self {
        Self {
            walk_score: record.walk_score,
            elementary_rating: record.schools.elementary,
            middle_rating: record.schools.middle,
            high_rating: record.schools.high,
            crime_index: record.demographics.crime_index,
            transit_distance_km: record.transit.as_ref().map(|t| t.distance_km),
        }
    }
}

/// Sums independent per-factor points. Unknown factors add nothing.
pub fn score_location(inputs: &LocationInputs) -> LocationScore {
    let score = walk_points(inputs.walk_score)
        + school_points(inputs.elementary_rating)
        + school_points(inputs.middle_rating)
        + school_points(inputs.high_rating)
        + crime_points(inputs.crime_index)
        + transit_points(inputs.transit_distance_km);

    LocationScore {
        score,
        category: LocationCategory::from_score(score),
    }
}

pub fn walk_points(walk_score: Option<u8>) -> u8 {
    match walk_score {
        Some(s) if s >= 80 => 3,
        Some(s) if s >= 60 => 2,
        Some(s) if s >= 40 => 1,
        _ => 0,
    }
}

pub fn school_points(rating: Option<u8>) -> u8 {
    match rating {
        Some(r) if r >= 8 => 2,
        Some(r) if r >= 6 => 1,
        _ => 0,
    }
}

/// Lower crime index is safer.
pub fn crime_points(crime_index: Option<u32>) -> u8 {
    match crime_index {
        Some(c) if c <= 30 => 2,
        Some(c) if c <= 50 => 1,
        _ => 0,
    }
}

pub fn transit_points(distance_km: Option<f64>) -> u8 {
    match distance_km {
        Some(d) if d <= 0.5 => 2,
        Some(d) if d <= 1.0 => 1,
        _ => 0,
    }
}
