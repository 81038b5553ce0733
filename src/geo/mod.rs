pub mod google;
pub mod location;
pub mod traits;

pub use google::{GoogleGeocoder, NoGeocoder, DEFAULT_GEOCODE_ENDPOINT};
pub use location::{locate, FixedPosition, NoPosition, LOCATION_TIMEOUT};
pub use traits::{GeolocationProvider, ReverseGeocoder};
