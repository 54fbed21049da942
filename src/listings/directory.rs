//! Venue directory grouped by city and state.

use super::show_classifier::upcoming_counts_by_venue;
use crate::listing_store::{ShowListing, Venue, VenueId};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: VenueId,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Groups `venues` by exact `(city, state)`.
///
/// Groups appear in order of their first venue; venues keep input order
/// inside their group. `shows` may contain shows of any venue, only the
/// upcoming ones are counted.
pub fn build_directory(venues: &[Venue], shows: &[ShowListing], now: NaiveDateTime) -> Vec<CityArea> {
    let upcoming = upcoming_counts_by_venue(shows, now);

    let mut areas: Vec<CityArea> = Vec::new();
    let mut area_index: HashMap<(&str, &str), usize> = HashMap::new();

    for venue in venues {
        let key = (venue.city.as_str(), venue.state.as_str());
        let index = *area_index.entry(key).or_insert_with(|| {
            areas.push(CityArea {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            areas.len() - 1
        });
        areas[index].venues.push(VenueSummary {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
        });
    }

    areas
}
