// regions.rs
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Inclusive latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub const fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Same latitude span, narrowed to a longitude band.
    pub const fn longitude_band(&self, lon_min: f64, lon_max: f64) -> Self {
        Self::new(self.lat_min, self.lat_max, lon_min, lon_max)
    }

    pub fn contains(&self, at: Coordinates) -> bool {
        (self.lat_min..=self.lat_max).contains(&at.latitude)
            && (self.lon_min..=self.lon_max).contains(&at.longitude)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RegionPredicate {
    Within(BoundingBox),
    /// Case-insensitive match of any name inside the address text.
    AddressMentions(&'static [&'static str]),
}

impl RegionPredicate {
    fn matches(&self, at: Option<Coordinates>, address_lower: &str) -> bool {
        match self {
            RegionPredicate::Within(bbox) => at.map_or(false, |c| bbox.contains(c)),
            RegionPredicate::AddressMentions(names) => {
                names.iter().any(|name| address_lower.contains(name))
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RegionRule<T: 'static> {
    pub name: &'static str,
    pub predicate: RegionPredicate,
    pub output: T,
}

/// Ordered rules evaluated top to bottom; first match wins, `default` otherwise.
#[derive(Debug)]
pub struct RegionRuleTable<T: 'static> {
    pub rules: &'static [RegionRule<T>],
    pub default: T,
}

impl<T: 'static> RegionRuleTable<T> {
    pub fn evaluate(&self, at: Option<Coordinates>, address: &str) -> &T {
        match self.matching_rule(at, address) {
            Some(rule) => {
                trace!(rule = rule.name, "Region rule matched");
                &rule.output
            }
            None => &self.default,
        }
    }

    /// Rule that fired, `None` when the default applied.
    pub fn matching_rule(&self, at: Option<Coordinates>, address: &str) -> Option<&RegionRule<T>> {
        let address_lower = address.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(at, &address_lower))
    }
}
