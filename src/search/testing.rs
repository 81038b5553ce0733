//! Listing fixtures shared by the search tests

use crate::models::{AvailabilityStatus, GenderPreference, Listing, PropertyType};

/// An unplaced PG listing with neutral field values
pub fn listing(id: &str) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Listing {id}"),
        address: String::new(),
        city: String::new(),
        property_type: PropertyType::Pg,
        gender_preference: GenderPreference::Any,
        availability_status: AvailabilityStatus::Available,
        rent_amount: 0.0,
        latitude: None,
        longitude: None,
        nearby_colleges: Vec::new(),
        sharing_options: Vec::new(),
        featured: false,
        rating: 0.0,
        created_date: None,
    }
}

pub fn placed(id: &str, latitude: f64, longitude: f64) -> Listing {
    Listing {
        latitude: Some(latitude),
        longitude: Some(longitude),
        ..listing(id)
    }
}
