pub mod controller;
pub mod distance;
pub mod filters;
pub mod nearby;
pub mod ranker;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::SearchController;
pub use distance::haversine_km;
pub use filters::{apply_structured_filters, apply_text_filter};
pub use nearby::{find_services, ServicePage, ServiceQuery};
pub use ranker::{rank_by_distance, search, RankedListing, ResultSummary};
pub use session::{LocateOutcome, Phase, SearchSession, NEAR_YOU_LABEL};
pub use types::{parse_filter, FilterSet, PriceRange, SortMode, SortSpec};
