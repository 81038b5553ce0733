use serde::Serialize;

use crate::models::{AvailabilityStatus, Coordinate, Listing};

use super::distance::haversine_km;
use super::filters::{apply_structured_filters, apply_text_filter};
use super::types::{FilterSet, SortMode};

/// A listing as shown in a result page, with its distance when known
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RankedListing<'a> {
    #[serde(flatten)]
    pub listing: &'a Listing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl RankedListing<'_> {
    /// Distance used for ordering; unplaceable listings count as infinitely far
    pub fn sort_key(&self) -> f64 {
        self.distance_km.unwrap_or(f64::INFINITY)
    }
}

/// Reorder every listing by ascending distance from `origin`.
///
/// Nothing is dropped. Listings without coordinates keep their relative
/// order and come after all placed listings.
pub fn rank_by_distance<'a, I>(listings: I, origin: Coordinate) -> Vec<RankedListing<'a>>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let mut ranked: Vec<RankedListing<'a>> = listings
        .into_iter()
        .map(|listing| RankedListing {
            listing,
            distance_km: listing
                .coordinate()
                .map(|position| haversine_km(origin, position)),
        })
        .collect();

    ranked.sort_by(|a, b| a.sort_key().total_cmp(&b.sort_key()));
    ranked
}

/// Present listings in their given order with no distance attached
pub fn unranked<'a, I>(listings: I) -> Vec<RankedListing<'a>>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .map(|listing| RankedListing {
            listing,
            distance_km: None,
        })
        .collect()
}

/// Full pipeline: text filter, structured filters, then ordering
pub fn search<'a>(
    listings: &'a [Listing],
    term: &str,
    filters: &FilterSet,
    sort: SortMode,
) -> Vec<RankedListing<'a>> {
    let matched = apply_structured_filters(apply_text_filter(listings, term), filters);

    match sort {
        SortMode::Store => unranked(matched),
        SortMode::Nearest(origin) => rank_by_distance(matched, origin),
    }
}

/// Headline counts shown above a result page
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ResultSummary {
    pub total: usize,
    pub available: usize,
    pub featured: usize,
}

impl ResultSummary {
    pub fn of(results: &[RankedListing<'_>]) -> Self {
        results.iter().fold(Self::default(), |mut summary, ranked| {
            summary.total += 1;
            if ranked.listing.availability_status == AvailabilityStatus::Available {
                summary.available += 1;
            }
            if ranked.listing.featured {
                summary.featured += 1;
            }
            summary
        })
    }
}
