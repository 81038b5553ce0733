use crate::error::GeocodeError;
use crate::geo::traits::ReverseGeocoder;
use crate::models::Coordinate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

/// Reverse geocoder speaking the Google Geocoding API shape
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self::with_endpoint(client, DEFAULT_GEOCODE_ENDPOINT, api_key)
    }

    pub fn with_endpoint(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn request_url(&self, position: Coordinate) -> String {
        format!(
            "{}?latlng={},{}&key={}",
            self.endpoint, position.latitude, position.longitude, self.api_key
        )
    }

    /// Locality of the first result; `Ok(None)` when it has none
    async fn lookup(&self, position: Coordinate) -> Result<Option<String>, GeocodeError> {
        let url = self.request_url(position);
        debug!("Reverse geocoding {}", position);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status()));
        }

        let body: GeocodeResponse = response.json().await?;
        if body.status != "OK" {
            return Err(GeocodeError::NotOk(body.status));
        }

        // a later locality component overrides an earlier one
        let locality = body.results.into_iter().next().and_then(|first| {
            first
                .address_components
                .into_iter()
                .rev()
                .find(|c| c.types.iter().any(|t| t == "locality"))
                .map(|c| c.long_name)
        });

        Ok(locality)
    }
}

#[async_trait]
impl ReverseGeocoder for GoogleGeocoder {
    async fn locality(&self, position: Coordinate) -> Option<String> {
        match self.lookup(position).await {
            Ok(locality) => locality.filter(|name| !name.is_empty()),
            Err(e) => {
                warn!("Reverse geocoding failed: {e}");
                None
            }
        }
    }
}

/// Used when no geocoding key is configured
pub struct NoGeocoder;

#[async_trait]
impl ReverseGeocoder for NoGeocoder {
    async fn locality(&self, _position: Coordinate) -> Option<String> {
        None
    }
}
