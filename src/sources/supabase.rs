use crate::error::StoreError;
use crate::models::Listing;
use crate::search::SortSpec;
use crate::sources::traits::ListingStore;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

const PROPERTIES_TABLE: &str = "properties";

/// Listings served by a Supabase (PostgREST) project
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStore {
    /// Create a store on top of a shared HTTP client
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, sort: Option<&SortSpec>) -> String {
        let mut url = format!("{}/rest/v1/{}?select=*", self.base_url, PROPERTIES_TABLE);
        if let Some(sort) = sort {
            let direction = if sort.descending { "desc" } else { "asc" };
            url.push_str(&format!("&order={}.{}", sort.column(), direction));
        }
        url
    }
}

#[async_trait]
impl ListingStore for SupabaseStore {
    async fn list(&self, sort: Option<&SortSpec>) -> Result<Vec<Listing>, StoreError> {
        let url = self.table_url(sort);

        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Supabase returned status: {}", response.status());
            return Err(StoreError::Status(response.status()));
        }

        let body = response.text().await?;
        debug!("Downloaded {} bytes of listings", body.len());

        let listings: Vec<Listing> = serde_json::from_str(&body)?;
        info!("Fetched {} listings from Supabase", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Supabase"
    }
}
