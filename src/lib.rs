//! Student-housing search: filter, rank and caption rental listings.
//!
//! Listings come from a [`sources::ListingStore`], are held in a
//! [`search::SearchSession`] and are narrowed by free text and a
//! [`search::FilterSet`], optionally ranked by distance from the requester.

pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod search;
pub mod sources;

pub use error::{FilterError, GeocodeError, LocationError, StoreError};
pub use models::{Coordinate, Listing, Service};
