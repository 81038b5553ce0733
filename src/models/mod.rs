use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// Kind of accommodation a listing offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Pg,
    Hostel,
    Room,
    Flat,
    Apartment,
}

/// Who a listing accepts as tenants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenderPreference {
    Male,
    Female,
    Coed,
    #[default]
    Any,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SharingOption {
    Single,
    Double,
    Triple,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    PartiallyAvailable,
    NotAvailable,
}

/// Category of a local service near the listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    MessTiffin,
    Laundry,
    Medical,
    Gym,
    DailyNeeds,
    Cafe,
}

/// Implements `FromStr`/`Display` over the snake_case wire names.
macro_rules! wire_names {
    ($ty:ident, $what:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = FilterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(FilterError::UnknownValue {
                        field: $what,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_names!(PropertyType, "property type", {
    Pg => "pg",
    Hostel => "hostel",
    Room => "room",
    Flat => "flat",
    Apartment => "apartment",
});

wire_names!(GenderPreference, "gender preference", {
    Male => "male",
    Female => "female",
    Coed => "coed",
    Any => "any",
});

wire_names!(SharingOption, "sharing option", {
    Single => "single",
    Double => "double",
    Triple => "triple",
});

wire_names!(AvailabilityStatus, "availability status", {
    Available => "available",
    PartiallyAvailable => "partially_available",
    NotAvailable => "not_available",
});

wire_names!(ServiceCategory, "service category", {
    MessTiffin => "mess_tiffin",
    Laundry => "laundry",
    Medical => "medical",
    Gym => "gym",
    DailyNeeds => "daily_needs",
    Cafe => "cafe",
});

/// A point on the WGS-84 ellipsoid, in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside the valid degree ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, FilterError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if valid {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(FilterError::InvalidCoordinate(format!(
                "{latitude},{longitude}"
            )))
        }
    }
}

impl FromStr for Coordinate {
    type Err = FilterError;

    /// Parses `"lat,lon"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FilterError::InvalidCoordinate(s.to_string());

        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

        Coordinate::new(lat, lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Pair the optional latitude/longitude fields of a stored record.
///
/// Both halves must be present and form a valid coordinate, anything else
/// means the record cannot be placed on the map.
fn locate(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinate> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon).ok(),
        _ => None,
    }
}

/// Treat an explicit JSON `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Record ids arrive as strings or as integer keys
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Signed(id) => id.to_string(),
        RawId::Unsigned(id) => id.to_string(),
    })
}

/// A rental listing as served by the listing store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    pub property_type: PropertyType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender_preference: GenderPreference,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability_status: AvailabilityStatus,
    pub rent_amount: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nearby_colleges: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sharing_options: Vec<SharingOption>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f32,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
}

impl Listing {
    /// Where the listing is, if it can be placed at all
    pub fn coordinate(&self) -> Option<Coordinate> {
        locate(self.latitude, self.longitude)
    }
}

/// A local service (mess, laundry, gym, ...) students look up near a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialties: Vec<String>,
    #[serde(default = "default_service_rating")]
    pub rating: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_service_rating() -> f32 {
    4.5
}

fn default_active() -> bool {
    true
}

impl Service {
    pub fn coordinate(&self) -> Option<Coordinate> {
        locate(self.latitude, self.longitude)
    }
}
