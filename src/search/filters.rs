//! Predicate chains over a materialized listing collection.
//!
//! Both filters borrow from the caller's collection and return the matching
//! listings in their input order. Nothing is cloned or mutated.

use crate::models::{GenderPreference, Listing};

use super::types::FilterSet;

/// Case-insensitive substring search over title, city, address and nearby
/// colleges. A blank term keeps everything.
pub fn apply_text_filter<'a, I>(listings: I, term: &str) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    if term.trim().is_empty() {
        return listings.into_iter().collect();
    }

    let needle = term.to_lowercase();
    listings
        .into_iter()
        .filter(|listing| matches_text(listing, &needle))
        .collect()
}

fn matches_text(listing: &Listing, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);

    hit(&listing.title)
        || hit(&listing.city)
        || hit(&listing.address)
        || listing.nearby_colleges.iter().any(|college| hit(college))
}

/// Keep the listings satisfying every active predicate of `filters`
pub fn apply_structured_filters<'a, I>(listings: I, filters: &FilterSet) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings
        .into_iter()
        .filter(|listing| matches_filters(listing, filters))
        .collect()
}

/// Conjunction of the active predicates; an absent field always passes.
pub fn matches_filters(listing: &Listing, filters: &FilterSet) -> bool {
    if let Some(property_type) = filters.property_type {
        if listing.property_type != property_type {
            return false;
        }
    }

    if let Some(range) = &filters.price_range {
        if !range.contains(listing.rent_amount) {
            return false;
        }
    }

    if let Some(gender) = filters.gender_preference {
        // open-to-all listings pass every gender filter
        if listing.gender_preference != gender && listing.gender_preference != GenderPreference::Any {
            return false;
        }
    }

    if let Some(city) = &filters.city {
        if listing.city != *city {
            return false;
        }
    }

    if let Some(sharing) = filters.sharing_option {
        if !listing.sharing_options.contains(&sharing) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyType, SharingOption};
    use crate::search::testing::listing;
    use crate::search::types::PriceRange;
    use proptest::prelude::*;

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn text_filter_is_case_insensitive() {
        let mut skyline = listing("1");
        skyline.title = "Skyline PG".to_string();
        let other = listing("2");
        let all = vec![skyline, other];

        assert_eq!(ids(&apply_text_filter(&all, "sky")), vec!["1"]);
        assert_eq!(ids(&apply_text_filter(&all, "SKYLINE")), vec!["1"]);
    }

    #[test]
    fn text_filter_checks_every_field() {
        let mut by_city = listing("city");
        by_city.city = "Kothrud".to_string();
        let mut by_address = listing("address");
        by_address.address = "12 FC Road".to_string();
        let mut by_college = listing("college");
        by_college.nearby_colleges = vec!["MIT World Peace University".to_string()];
        let all = vec![by_city, by_address, by_college, listing("none")];

        assert_eq!(ids(&apply_text_filter(&all, "kothrud")), vec!["city"]);
        assert_eq!(ids(&apply_text_filter(&all, "fc road")), vec!["address"]);
        assert_eq!(ids(&apply_text_filter(&all, "peace")), vec!["college"]);
    }

    #[test]
    fn blank_term_is_identity() {
        let all = vec![listing("1"), listing("2")];
        assert_eq!(apply_text_filter(&all, "").len(), 2);
        assert_eq!(apply_text_filter(&all, "   ").len(), 2);
    }

    #[test]
    fn price_range_filter() {
        let mut cheap = listing("7000");
        cheap.rent_amount = 7000.0;
        let mut pricey = listing("12000");
        pricey.rent_amount = 12000.0;
        let mut luxury = listing("20000");
        luxury.rent_amount = 20000.0;
        let all = vec![cheap, pricey, luxury];

        let closed = FilterSet {
            price_range: Some("5000-10000".parse().unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&apply_structured_filters(&all, &closed)), vec!["7000"]);

        let open = FilterSet {
            price_range: Some(PriceRange {
                min: 15000.0,
                max: None,
            }),
            ..Default::default()
        };
        assert_eq!(ids(&apply_structured_filters(&all, &open)), vec!["20000"]);
    }

    #[test]
    fn city_and_gender_with_any() {
        let mut female = listing("female");
        female.city = "Pune".to_string();
        female.gender_preference = GenderPreference::Female;
        female.rent_amount = 8000.0;
        let mut any = listing("any");
        any.city = "Pune".to_string();
        any.gender_preference = GenderPreference::Any;
        any.rent_amount = 9000.0;
        let mut male = listing("male");
        male.city = "Mumbai".to_string();
        male.gender_preference = GenderPreference::Male;
        male.rent_amount = 8000.0;
        let all = vec![female, any, male];

        let filters = FilterSet {
            city: Some("Pune".to_string()),
            gender_preference: Some(GenderPreference::Female),
            ..Default::default()
        };

        assert_eq!(ids(&apply_structured_filters(&all, &filters)), vec!["female", "any"]);
    }

    #[test]
    fn city_is_exact_not_substring() {
        let mut pune = listing("pune");
        pune.city = "Pune".to_string();
        let all = vec![pune];

        let filters = FilterSet {
            city: Some("Pun".to_string()),
            ..Default::default()
        };
        assert!(apply_structured_filters(&all, &filters).is_empty());
    }

    #[test]
    fn sharing_filter_excludes_listings_without_options() {
        let mut single = listing("single");
        single.sharing_options = vec![SharingOption::Single, SharingOption::Double];
        let bare = listing("bare");
        let all = vec![single, bare];

        let filters = FilterSet {
            sharing_option: Some(SharingOption::Double),
            ..Default::default()
        };
        assert_eq!(ids(&apply_structured_filters(&all, &filters)), vec!["single"]);
    }

    #[test]
    fn unconstrained_filters_keep_everything() {
        let all = vec![listing("1"), listing("2"), listing("3")];
        assert_eq!(apply_structured_filters(&all, &FilterSet::default()).len(), 3);
    }

    fn arb_listing() -> impl Strategy<Value = Listing> {
        (
            0usize..5,
            0usize..4,
            0u32..30_000,
            prop::sample::select(vec!["Pune", "Mumbai", "Nashik"]),
            prop::collection::vec(0usize..3, 0..3),
        )
            .prop_map(|(kind, gender, rent, city, sharing)| {
                let mut l = listing(&format!("{kind}-{gender}-{rent}-{city}"));
                l.property_type = [
                    PropertyType::Pg,
                    PropertyType::Hostel,
                    PropertyType::Room,
                    PropertyType::Flat,
                    PropertyType::Apartment,
                ][kind];
                l.gender_preference = [
                    GenderPreference::Male,
                    GenderPreference::Female,
                    GenderPreference::Coed,
                    GenderPreference::Any,
                ][gender];
                l.rent_amount = f64::from(rent);
                l.city = city.to_string();
                l.sharing_options = sharing
                    .into_iter()
                    .map(|s| [SharingOption::Single, SharingOption::Double, SharingOption::Triple][s])
                    .collect();
                l
            })
    }

    fn arb_filters() -> impl Strategy<Value = FilterSet> {
        (
            prop::option::of(prop::sample::select(vec![PropertyType::Pg, PropertyType::Flat])),
            prop::option::of((0u32..20_000, prop::option::of(0u32..20_000))),
            prop::option::of(prop::sample::select(vec![
                GenderPreference::Male,
                GenderPreference::Female,
            ])),
            prop::option::of(prop::sample::select(vec!["Pune", "Mumbai"])),
            prop::option::of(prop::sample::select(vec![
                SharingOption::Single,
                SharingOption::Triple,
            ])),
        )
            .prop_map(|(property_type, price, gender, city, sharing)| FilterSet {
                property_type,
                price_range: price.map(|(min, span)| PriceRange {
                    min: f64::from(min),
                    max: span.map(|span| f64::from(min + span)),
                }),
                gender_preference: gender,
                city: city.map(str::to_string),
                sharing_option: sharing,
            })
    }

    proptest! {
        /// Property: output is exactly the listings matching every predicate, in input order
        #[test]
        fn prop_conjunctive_subset(
            all in prop::collection::vec(arb_listing(), 0..20),
            filters in arb_filters(),
        ) {
            let kept = apply_structured_filters(&all, &filters);
            let expected: Vec<&Listing> = all.iter().filter(|l| matches_filters(l, &filters)).collect();
            prop_assert_eq!(&kept, &expected);

            for l in &kept {
                if let Some(t) = filters.property_type { prop_assert_eq!(l.property_type, t); }
                if let Some(r) = &filters.price_range { prop_assert!(r.contains(l.rent_amount)); }
                if let Some(c) = &filters.city { prop_assert_eq!(&l.city, c); }
                if let Some(s) = filters.sharing_option { prop_assert!(l.sharing_options.contains(&s)); }
            }
        }

        /// Property: filtering twice changes nothing
        #[test]
        fn prop_idempotent(
            all in prop::collection::vec(arb_listing(), 0..20),
            filters in arb_filters(),
        ) {
            let once = apply_structured_filters(&all, &filters);
            let twice = apply_structured_filters(once.iter().copied(), &filters);
            prop_assert_eq!(once, twice);
        }
    }
}
