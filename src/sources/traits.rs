use crate::error::StoreError;
use crate::models::Listing;
use crate::search::SortSpec;
use async_trait::async_trait;

/// Common trait for everything that can hand over the listing collection
/// This allows swapping the JSON file for the hosted database without touching the search
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Fetch every listing, ordered by `sort` when given
    async fn list(&self, sort: Option<&SortSpec>) -> Result<Vec<Listing>, StoreError>;

    /// Get the name of the store for logs
    fn source_name(&self) -> &'static str;
}
