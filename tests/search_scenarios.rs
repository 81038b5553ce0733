use std::sync::Arc;

use async_trait::async_trait;
use nestfinder::error::StoreError;
use nestfinder::geo::{FixedPosition, GoogleGeocoder, NoGeocoder};
use nestfinder::models::{Coordinate, GenderPreference, Listing};
use nestfinder::search::{
    apply_structured_filters, rank_by_distance, FilterSet, LocateOutcome, Phase, SearchController,
    SortSpec,
};
use nestfinder::sources::{ListingStore, MemoryStore};
use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listings(value: serde_json::Value) -> Vec<Listing> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn pune_female_scenario() {
    let all = listings(json!([
        { "id": "1", "title": "A", "property_type": "pg", "city": "Pune", "gender_preference": "female", "rent_amount": 8000 },
        { "id": "2", "title": "B", "property_type": "pg", "city": "Pune", "gender_preference": "any", "rent_amount": 9000 },
        { "id": "3", "title": "C", "property_type": "pg", "city": "Mumbai", "gender_preference": "male", "rent_amount": 8000 }
    ]));

    let filters = FilterSet {
        city: Some("Pune".to_string()),
        gender_preference: Some(GenderPreference::Female),
        ..Default::default()
    };

    let kept: Vec<&str> = apply_structured_filters(&all, &filters)
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(kept, vec!["1", "2"]);
}

#[test]
fn distance_ordering_scenario() {
    let all = listings(json!([
        { "id": "unplaced", "title": "X", "property_type": "room", "rent_amount": 1 },
        { "id": "mumbai", "title": "Y", "property_type": "room", "rent_amount": 1, "latitude": 19.07, "longitude": 72.87 },
        { "id": "origin", "title": "Z", "property_type": "room", "rent_amount": 1, "latitude": 18.52, "longitude": 73.85 }
    ]));

    let ranked = rank_by_distance(&all, Coordinate::new(18.52, 73.85).unwrap());
    let order: Vec<&str> = ranked.iter().map(|r| r.listing.id.as_str()).collect();
    assert_eq!(order, vec!["origin", "mumbai", "unplaced"]);
    assert_eq!(ranked[0].distance_km, Some(0.0));
    let mumbai = ranked[1].distance_km.unwrap();
    assert!((115.0..125.0).contains(&mumbai), "got {mumbai}");
    assert!(ranked[2].distance_km.is_none());
}

struct BrokenStore;

#[async_trait]
impl ListingStore for BrokenStore {
    async fn list(&self, _sort: Option<&SortSpec>) -> Result<Vec<Listing>, StoreError> {
        Err(StoreError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }

    fn source_name(&self) -> &'static str {
        "broken"
    }
}

#[tokio::test]
async fn store_failure_yields_empty_results() {
    let mut controller = SearchController::new(Arc::new(BrokenStore), Arc::new(NoGeocoder));
    controller.load().await;

    assert_eq!(controller.session().phase(), Phase::Ready);
    assert!(controller.session().results().is_empty());
}

#[tokio::test]
async fn use_my_location_captions_with_locality() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("latlng", "18.52,73.85"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                { "address_components": [ { "long_name": "Pune", "types": ["locality", "political"] } ] }
            ]
        })))
        .mount(&server)
        .await;

    let store = MemoryStore::new(listings(json!([
        { "id": "far", "title": "Far", "property_type": "flat", "rent_amount": 12000, "latitude": 19.07, "longitude": 72.87,
          "created_date": "2025-01-01T00:00:00Z" },
        { "id": "near", "title": "Near", "property_type": "pg", "rent_amount": 7000, "latitude": 18.53, "longitude": 73.86,
          "created_date": "2024-01-01T00:00:00Z" }
    ])));
    let geocoder = GoogleGeocoder::with_endpoint(reqwest::Client::new(), server.uri(), "key");

    let mut controller = SearchController::new(Arc::new(store), Arc::new(geocoder));
    controller.load().await;

    let newest: Vec<String> = controller
        .session()
        .results()
        .iter()
        .map(|r| r.listing.id.clone())
        .collect();
    assert_eq!(newest, vec!["far", "near"]);

    let here = FixedPosition(Coordinate::new(18.52, 73.85).unwrap());
    assert_eq!(controller.use_my_location(&here).await, LocateOutcome::Applied);

    let session = controller.session();
    assert_eq!(session.label(), Some("Pune"));
    let nearest: Vec<String> = session.results().iter().map(|r| r.listing.id.clone()).collect();
    assert_eq!(nearest, vec!["near", "far"]);
}
