//! Read-side use cases. Each takes the store and the request's `now` and
//! returns a plain view structure for the page renderer.

use super::directory::{build_directory, CityArea};
use super::search::{search_by_name, SearchResults};
use super::show_classifier::{
    partition_shows, upcoming_counts_by_artist, upcoming_counts_by_venue, is_upcoming,
};
use crate::listing_store::{
    Artist, ArtistId, ListingStore, ShowListing, StoreResult, ValidationError, ValidationResult,
    Venue, VenueId,
};
use chrono::NaiveDateTime;
use serde::Serialize;

/// How start times are shown on detail pages.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Short weekday, month, day, year and 12h time, e.g. `Sat 04, 21, 2035 9:30PM`.
pub const MEDIUM_FORMAT: &str = "%a %m, %d, %Y %-I:%M%p";

const ACCEPTED_START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn format_start_time(start_time: &NaiveDateTime) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}

pub fn format_medium(start_time: &NaiveDateTime) -> String {
    start_time.format(MEDIUM_FORMAT).to_string()
}

/// Parse a submitted start time. Accepts the display format, the same
/// without seconds, and what a `datetime-local` input sends.
pub fn parse_start_time(raw: &str) -> ValidationResult<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "start_time",
        });
    }
    ACCEPTED_START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "start_time",
            value: raw.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueAppearance {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<ArtistAppearance>,
    pub upcoming_shows: Vec<ArtistAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<VenueAppearance>,
    pub upcoming_shows: Vec<VenueAppearance>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: ArtistId,
    pub name: String,
}

/// A venue as offered in the new-show form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueChoice {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowCard {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

fn artist_appearance(show: ShowListing) -> ArtistAppearance {
    ArtistAppearance {
        artist_id: show.artist_id,
        artist_name: show.artist_name,
        artist_image_link: show.artist_image_link,
        start_time: format_start_time(&show.start_time),
    }
}

fn venue_appearance(show: ShowListing) -> VenueAppearance {
    VenueAppearance {
        venue_id: show.venue_id,
        venue_name: show.venue_name,
        venue_image_link: show.venue_image_link,
        start_time: format_start_time(&show.start_time),
    }
}

pub fn venue_directory(store: &dyn ListingStore, now: NaiveDateTime) -> StoreResult<Vec<CityArea>> {
    let venues = store.list_venues()?;
    let shows = store.list_shows()?;
    Ok(build_directory(&venues, &shows, now))
}

pub fn search_venues(
    store: &dyn ListingStore,
    term: &str,
    now: NaiveDateTime,
) -> StoreResult<SearchResults> {
    let venues = store.list_venues()?;
    let counts = upcoming_counts_by_venue(&store.list_shows()?, now);
    Ok(search_by_name(term, &venues, &counts))
}

pub fn search_artists(
    store: &dyn ListingStore,
    term: &str,
    now: NaiveDateTime,
) -> StoreResult<SearchResults> {
    let artists = store.list_artists()?;
    let counts = upcoming_counts_by_artist(&store.list_shows()?, now);
    Ok(search_by_name(term, &artists, &counts))
}

/// `Ok(None)` when the venue does not exist.
pub fn venue_detail(
    store: &dyn ListingStore,
    id: VenueId,
    now: NaiveDateTime,
) -> StoreResult<Option<VenueDetail>> {
    let Some(venue) = store.get_venue(id)? else {
        return Ok(None);
    };
    let shows = partition_shows(store.shows_for_venue(id)?, now);
    let past_shows: Vec<ArtistAppearance> =
        shows.past.into_iter().map(artist_appearance).collect();
    let upcoming_shows: Vec<ArtistAppearance> =
        shows.upcoming.into_iter().map(artist_appearance).collect();
    Ok(Some(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// `Ok(None)` when the artist does not exist.
pub fn artist_detail(
    store: &dyn ListingStore,
    id: ArtistId,
    now: NaiveDateTime,
) -> StoreResult<Option<ArtistDetail>> {
    let Some(artist) = store.get_artist(id)? else {
        return Ok(None);
    };
    let shows = partition_shows(store.shows_for_artist(id)?, now);
    let past_shows: Vec<VenueAppearance> = shows.past.into_iter().map(venue_appearance).collect();
    let upcoming_shows: Vec<VenueAppearance> =
        shows.upcoming.into_iter().map(venue_appearance).collect();
    Ok(Some(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

pub fn artist_roster(store: &dyn ListingStore) -> StoreResult<Vec<ArtistSummary>> {
    Ok(store
        .list_artists()?
        .into_iter()
        .map(|a| ArtistSummary {
            id: a.id,
            name: a.name,
        })
        .collect())
}

pub fn venue_choices(store: &dyn ListingStore) -> StoreResult<Vec<VenueChoice>> {
    Ok(store
        .list_venues()?
        .into_iter()
        .map(|v| VenueChoice {
            id: v.id,
            name: v.name,
            city: v.city,
            state: v.state,
        })
        .collect())
}

/// Shows that have not started yet, soonest first.
pub fn upcoming_shows(store: &dyn ListingStore, now: NaiveDateTime) -> StoreResult<Vec<ShowCard>> {
    Ok(store
        .list_shows()?
        .into_iter()
        .filter(|s| is_upcoming(s.start_time, now))
        .map(|s| ShowCard {
            venue_id: s.venue_id,
            venue_name: s.venue_name,
            artist_id: s.artist_id,
            artist_name: s.artist_name,
            artist_image_link: s.artist_image_link,
            start_time: s.start_time,
        })
        .collect())
}
