//! Explicit state of one search session.
//!
//! `Idle -> Loading -> Ready -> Loading -> Ready ...`. A session owns its
//! listing collection; the ranking functions only ever borrow it.

use tracing::{debug, info, warn};

use crate::error::{LocationError, StoreError};
use crate::models::{Coordinate, Listing};

use super::ranker::{search, RankedListing, ResultSummary};
use super::types::{FilterSet, SortMode};

/// Label shown when the requester's locality could not be resolved
pub const NEAR_YOU_LABEL: &str = "Properties near you";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
}

/// Proof that a location request was started; completions must present it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocateTicket(u64);

/// What happened to a finished location request
#[derive(Debug, Clone, PartialEq)]
pub enum LocateOutcome {
    /// Results now ranked by distance from the position
    Applied,
    /// A newer request was started meanwhile; this one was dropped
    Stale,
    /// Position unknown; previous results kept
    Failed(LocationError),
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    phase: Phase,
    listings: Vec<Listing>,
    term: String,
    filters: FilterSet,
    sort: SortMode,
    label: Option<String>,
    latest_ticket: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            listings: Vec::new(),
            term: String::new(),
            filters: FilterSet::default(),
            sort: SortMode::Store,
            label: None,
            latest_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    /// Locality caption for a nearest-first view
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Initial load or refresh is starting
    pub fn begin_load(&mut self) {
        debug!("Session loading listings");
        self.phase = Phase::Loading;
    }

    /// Store answered; a failure leaves an empty, usable session
    pub fn finish_load(&mut self, result: Result<Vec<Listing>, StoreError>) {
        self.listings = match result {
            Ok(listings) => {
                info!("Loaded {} listings", listings.len());
                listings
            }
            Err(e) => {
                warn!("Error loading listings: {e}");
                Vec::new()
            }
        };
        self.phase = Phase::Ready;
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    /// Go back to the store's order and drop the locality caption
    pub fn clear_location(&mut self) {
        self.sort = SortMode::Store;
        self.label = None;
    }

    /// Start a "use my location" request, superseding any in flight
    pub fn begin_locate(&mut self) -> LocateTicket {
        self.latest_ticket += 1;
        self.phase = Phase::Loading;
        debug!("Locate request {} started", self.latest_ticket);
        LocateTicket(self.latest_ticket)
    }

    /// Finish a location request.
    ///
    /// Only the most recent ticket is honored. On success the view switches
    /// to nearest-first with filters and term reset; `locality` only sets
    /// the caption.
    pub fn complete_locate(
        &mut self,
        ticket: LocateTicket,
        position: Result<Coordinate, LocationError>,
        locality: Option<String>,
    ) -> LocateOutcome {
        if ticket.0 != self.latest_ticket {
            debug!(
                "Ignoring locate request {} (latest is {})",
                ticket.0, self.latest_ticket
            );
            return LocateOutcome::Stale;
        }

        self.phase = Phase::Ready;

        match position {
            Ok(origin) => {
                info!("Ranking listings near {origin}");
                self.sort = SortMode::Nearest(origin);
                self.filters = FilterSet::default();
                self.term.clear();
                self.label = Some(locality.unwrap_or_else(|| NEAR_YOU_LABEL.to_string()));
                LocateOutcome::Applied
            }
            Err(e) => {
                warn!("Location error: {e}");
                LocateOutcome::Failed(e)
            }
        }
    }

    /// Current result page; empty until the first load finished
    pub fn results(&self) -> Vec<RankedListing<'_>> {
        if self.phase == Phase::Idle {
            return Vec::new();
        }
        search(&self.listings, &self.term, &self.filters, self.sort)
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary::of(&self.results())
    }
}
