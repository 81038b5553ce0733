use thiserror::Error;

/// Bad user input for a filter, sort or coordinate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },

    #[error("Invalid price range: {0} (expected \"min-max\" or \"min-\")")]
    InvalidPriceRange(String),

    #[error("Invalid coordinate: {0} (expected \"lat,lon\" in degrees)")]
    InvalidCoordinate(String),

    #[error("Invalid sort spec: {0}")]
    InvalidSort(String),
}

/// The listing store could not hand over its collection
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read listings from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Listing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Listing store returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed listing payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Sort(#[from] FilterError),
}

/// Why the requester's position is unknown
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("Unable to get your location. Please allow location access.")]
    PermissionDenied,

    #[error("Unable to get your location. Location unavailable.")]
    Unavailable,

    #[error("Unable to get your location. Request timed out.")]
    Timeout,
}

/// Reverse geocoding failure; never leaves the geocoder
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Geocode request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoder returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Geocoder answered {0}")]
    NotOk(String),
}
