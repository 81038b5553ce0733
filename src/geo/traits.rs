use crate::error::LocationError;
use crate::models::Coordinate;
use async_trait::async_trait;

/// Source of the requester's current position
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Turns a coordinate into a human-readable locality name
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// `None` whenever the locality cannot be resolved, for whatever reason
    async fn locality(&self, position: Coordinate) -> Option<String>;
}
