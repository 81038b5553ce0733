//! Local services around a student: mess, laundry, gym and the like.

use serde::Serialize;
use tracing::debug;

use crate::models::{Coordinate, Service, ServiceCategory};

use super::distance::{haversine_km, round_tenth};

pub const DEFAULT_MAX_DISTANCE_KM: f64 = 5.0;
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceQuery {
    /// Case-insensitive substring of the service city
    pub city: Option<String>,
    pub category: Option<ServiceCategory>,
    /// Case-insensitive substring of name, description or a specialty
    pub search: Option<String>,
    pub origin: Option<Coordinate>,
    pub max_distance_km: f64,
    /// 1-based
    pub page: usize,
    pub limit: usize,
}

impl Default for ServiceQuery {
    fn default() -> Self {
        Self {
            city: None,
            category: None,
            search: None,
            origin: None,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RankedService<'a> {
    #[serde(flatten)]
    pub service: &'a Service,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServicePage<'a> {
    pub services: Vec<RankedService<'a>>,
    /// Matches before pagination and distance cut-off
    pub total: usize,
    pub pages: usize,
    pub current_page: usize,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches(service: &Service, query: &ServiceQuery) -> bool {
    if !service.active {
        return false;
    }

    if let Some(city) = &query.city {
        if !contains_ci(&service.city, &city.to_lowercase()) {
            return false;
        }
    }

    if let Some(category) = query.category {
        if service.category != category {
            return false;
        }
    }

    if let Some(term) = query.search.as_deref().filter(|t| !t.trim().is_empty()) {
        let needle = term.to_lowercase();
        let hit = contains_ci(&service.name, &needle)
            || contains_ci(&service.description, &needle)
            || service.specialties.iter().any(|s| contains_ci(s, &needle));
        if !hit {
            return false;
        }
    }

    true
}

/// Filter, order and paginate services, then rank the page by distance
/// when an origin is given.
///
/// The distance cut-off only drops services that can be placed; unplaced
/// ones stay on the page after every placed one.
pub fn find_services<'a>(services: &'a [Service], query: &ServiceQuery) -> ServicePage<'a> {
    let mut matched: Vec<&Service> = services.iter().filter(|s| matches(s, query)).collect();

    // verified first, best rated next
    matched.sort_by(|a, b| {
        b.verified
            .cmp(&a.verified)
            .then_with(|| b.rating.total_cmp(&a.rating))
    });

    let total = matched.len();
    let limit = query.limit.max(1);
    let page = query.page.max(1);
    let pages = total.div_ceil(limit);

    let on_page = matched.into_iter().skip((page - 1).saturating_mul(limit)).take(limit);

    let services = match query.origin {
        None => on_page
            .map(|service| RankedService {
                service,
                distance_km: None,
            })
            .collect(),
        Some(origin) => {
            let mut ranked: Vec<RankedService<'a>> = on_page
                .map(|service| RankedService {
                    service,
                    distance_km: service
                        .coordinate()
                        .map(|position| round_tenth(haversine_km(origin, position))),
                })
                .filter(|r| r.distance_km.map_or(true, |d| d <= query.max_distance_km))
                .collect();

            ranked.sort_by(|a, b| {
                let a = a.distance_km.unwrap_or(f64::INFINITY);
                let b = b.distance_km.unwrap_or(f64::INFINITY);
                a.total_cmp(&b)
            });
            ranked
        }
    };

    debug!(
        "Services query matched {total}, page {page}/{pages} holds {}",
        services.len()
    );

    ServicePage {
        services,
        total,
        pages,
        current_page: page,
    }
}
