use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::FilterError;
use crate::models::{Coordinate, GenderPreference, Listing, PropertyType, SharingOption};

/// Text that means "no constraint" in a filter field
pub const ALL: &str = "all";

/// Parse a filter field where `"all"` (or nothing) means unconstrained
pub fn parse_filter<T>(value: &str) -> Result<Option<T>, T::Err>
where
    T: FromStr,
{
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

/// Inclusive rent bounds; `max` of `None` is unbounded above
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn contains(&self, rent: f64) -> bool {
        rent >= self.min && self.max.map_or(true, |max| rent <= max)
    }
}

impl FromStr for PriceRange {
    type Err = FilterError;

    /// Parses `"5000-10000"` or the open-ended `"15000-"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FilterError::InvalidPriceRange(s.to_string());

        let (min, max) = s.trim().split_once('-').ok_or_else(invalid)?;
        let min: f64 = min.trim().parse().map_err(|_| invalid())?;
        let max = match max.trim() {
            "" => None,
            max => Some(max.parse::<f64>().map_err(|_| invalid())?),
        };

        if !min.is_finite() || max.is_some_and(|max| !max.is_finite() || max < min) {
            return Err(invalid());
        }

        Ok(Self { min, max })
    }
}

/// Structured constraints chosen by the user; `None` fields are "all"
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterSet {
    pub property_type: Option<PropertyType>,
    pub price_range: Option<PriceRange>,
    pub gender_preference: Option<GenderPreference>,
    pub city: Option<String>,
    pub sharing_option: Option<SharingOption>,
}

impl FilterSet {
    /// True when no predicate is active
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterSet::default()
    }
}

/// How the session orders its results
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortMode {
    /// Keep the order the store returned
    Store,
    /// Ascending great-circle distance from the origin
    Nearest(Coordinate),
}

/// A listing field the stores know how to order by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedDate,
    RentAmount,
    Rating,
    Title,
}

/// `"-created_date"` sorts newest first, `"rent_amount"` cheapest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub descending: bool,
}

impl SortSpec {
    pub fn newest_first() -> Self {
        Self {
            field: SortField::CreatedDate,
            descending: true,
        }
    }

    /// Column name the stores use for this field
    pub fn column(&self) -> &'static str {
        match self.field {
            SortField::CreatedDate => "created_date",
            SortField::RentAmount => "rent_amount",
            SortField::Rating => "rating",
            SortField::Title => "title",
        }
    }

    pub fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        let ordering = match self.field {
            // undated listings count as oldest
            SortField::CreatedDate => a.created_date.cmp(&b.created_date),
            SortField::RentAmount => a.rent_amount.total_cmp(&b.rent_amount),
            SortField::Rating => a.rating.total_cmp(&b.rating),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };

        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Stable in-place sort of a listing collection
    pub fn apply(&self, listings: &mut [Listing]) {
        listings.sort_by(|a, b| self.compare(a, b));
    }
}

impl FromStr for SortSpec {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (descending, name) = match s.strip_prefix('-') {
            Some(name) => (true, name),
            None => (false, s),
        };

        let field = match name {
            "created_date" | "createdAt" => SortField::CreatedDate,
            "rent_amount" => SortField::RentAmount,
            "rating" => SortField::Rating,
            "title" => SortField::Title,
            _ => return Err(FilterError::InvalidSort(s.to_string())),
        };

        Ok(Self { field, descending })
    }
}
