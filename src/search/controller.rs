use std::sync::Arc;

use tracing::info;

use crate::geo::{locate, GeolocationProvider, ReverseGeocoder};
use crate::sources::ListingStore;

use super::session::{LocateOutcome, SearchSession};
use super::types::SortSpec;

/// Drives a [`SearchSession`] against its collaborators
pub struct SearchController {
    store: Arc<dyn ListingStore>,
    geocoder: Arc<dyn ReverseGeocoder>,
    sort: Option<SortSpec>,
    session: SearchSession,
}

impl SearchController {
    pub fn new(store: Arc<dyn ListingStore>, geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self {
            store,
            geocoder,
            sort: Some(SortSpec::newest_first()),
            session: SearchSession::new(),
        }
    }

    /// Order requested from the store on every load
    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SearchSession {
        &mut self.session
    }

    /// Fetch the full collection; used for the first load and refreshes
    pub async fn load(&mut self) {
        info!("Loading listings from {}", self.store.source_name());
        self.session.begin_load();
        let result = self.store.list(self.sort.as_ref()).await;
        self.session.finish_load(result);
    }

    /// Rank by distance from the requester and caption with their locality.
    ///
    /// Holds the controller for the whole request, so calls never overlap.
    /// Callers that need overlapping requests drive the session directly with
    /// [`SearchSession::begin_locate`] and [`SearchSession::complete_locate`].
    pub async fn use_my_location(&mut self, provider: &dyn GeolocationProvider) -> LocateOutcome {
        let ticket = self.session.begin_locate();

        let position = locate(provider).await;
        let locality = match position {
            Ok(origin) => self.geocoder.locality(origin).await,
            Err(_) => None,
        };

        self.session.complete_locate(ticket, position, locality)
    }
}
