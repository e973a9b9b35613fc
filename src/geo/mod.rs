pub mod estimators;
pub mod geocoder;
pub mod places;
pub mod regions;

pub use estimators::{Demographics, SchoolRatings, TransitEstimate};
pub use geocoder::{geocode_address, Geocoder, NominatimGeocoder};
pub use places::{GooglePlacesClient, NearbyPlaces};
pub use regions::Coordinates;
