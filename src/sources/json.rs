use crate::error::StoreError;
use crate::models::{Listing, Service};
use crate::search::SortSpec;
use crate::sources::traits::ListingStore;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Read a JSON array of records from disk
async fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;

    debug!("Read {} bytes from {}", raw.len(), path.display());

    Ok(serde_json::from_str(&raw)?)
}

/// Services file used by the `services` command
pub async fn load_services(path: &Path) -> Result<Vec<Service>, StoreError> {
    let services: Vec<Service> = read_json_array(path).await?;
    info!("Loaded {} services from {}", services.len(), path.display());
    Ok(services)
}

/// Listings kept in a JSON file, one array of listing objects
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ListingStore for JsonFileStore {
    async fn list(&self, sort: Option<&SortSpec>) -> Result<Vec<Listing>, StoreError> {
        let mut listings: Vec<Listing> = read_json_array(&self.path).await?;

        if let Some(sort) = sort {
            sort.apply(&mut listings);
        }

        info!("Loaded {} listings from {}", listings.len(), self.path.display());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "JSON file"
    }
}

/// Listings held in memory, for embedding and tests
pub struct MemoryStore {
    listings: Vec<Listing>,
}

impl MemoryStore {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn list(&self, sort: Option<&SortSpec>) -> Result<Vec<Listing>, StoreError> {
        let mut listings = self.listings.clone();
        if let Some(sort) = sort {
            sort.apply(&mut listings);
        }
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "memory"
    }
}
