use crate::error::LocationError;
use crate::geo::traits::GeolocationProvider;
use crate::models::Coordinate;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Longest we wait for a position fix
pub const LOCATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Ask the provider for a position, giving up after [`LOCATION_TIMEOUT`]
pub async fn locate(provider: &dyn GeolocationProvider) -> Result<Coordinate, LocationError> {
    match tokio::time::timeout(LOCATION_TIMEOUT, provider.current_position()).await {
        Ok(position) => position,
        Err(_) => {
            warn!("No position within {:?}", LOCATION_TIMEOUT);
            Err(LocationError::Timeout)
        }
    }
}

/// A position known up front, e.g. given on the command line
pub struct FixedPosition(pub Coordinate);

#[async_trait]
impl GeolocationProvider for FixedPosition {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// No positioning available on this host
pub struct NoPosition;

#[async_trait]
impl GeolocationProvider for NoPosition {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unavailable)
    }
}
