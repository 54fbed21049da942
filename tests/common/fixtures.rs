//! Seeded listings for end-to-end tests

use super::constants::*;
use chrono::NaiveDate;
use gigboard_server::listing_store::{
    ArtistFields, DeletePolicy, ListingStore, NewShow, SqliteListingStore, VenueFields,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn genres(names: &[&str]) -> Vec<String> {
    names.iter().map(|g| g.to_string()).collect()
}

/// Creates a temporary SQLite listings database with three venues, three
/// artists and four shows (one in the past, three far in the future).
pub fn create_test_db() -> anyhow::Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("listings.db");
    let store = SqliteListingStore::new(&db_path, DeletePolicy::Reject)?;

    let hop = store.create_venue(&VenueFields {
        name: VENUE_HOP_NAME.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: "123-123-1234".to_string(),
        genres: genres(&["Jazz", "Reggae", "Folk"]),
        seeking_talent: true,
        seeking_description: "We are on the lookout for a local artist to play every two weeks."
            .to_string(),
        ..Default::default()
    })?;
    let park = store.create_venue(&VenueFields {
        name: VENUE_PARK_NAME.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "34 Whiskey Moore Ave".to_string(),
        genres: genres(&["Rock n Roll", "Jazz", "Classical", "Folk"]),
        ..Default::default()
    })?;
    let pianos = store.create_venue(&VenueFields {
        name: VENUE_PIANOS_NAME.to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        address: "335 Delancey Street".to_string(),
        genres: genres(&["Classical", "R&B", "Hip-Hop"]),
        ..Default::default()
    })?;
    assert_eq!(
        (hop.id, park.id, pianos.id),
        (VENUE_HOP_ID, VENUE_PARK_ID, VENUE_PIANOS_ID)
    );

    let petals = store.create_artist(&ArtistFields {
        name: ARTIST_PETALS_NAME.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        genres: genres(&["Rock n Roll"]),
        seeking_venue: true,
        seeking_description: "Looking for shows to perform at in the San Francisco Bay Area!"
            .to_string(),
        ..Default::default()
    })?;
    let quevedo = store.create_artist(&ArtistFields {
        name: ARTIST_QUEVEDO_NAME.to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        genres: genres(&["Jazz"]),
        ..Default::default()
    })?;
    let sax = store.create_artist(&ArtistFields {
        name: ARTIST_SAX_NAME.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        genres: genres(&["Jazz", "Classical"]),
        ..Default::default()
    })?;
    assert_eq!(
        (petals.id, quevedo.id, sax.id),
        (ARTIST_PETALS_ID, ARTIST_QUEVEDO_ID, ARTIST_SAX_ID)
    );

    let shows = [
        (VENUE_HOP_ID, ARTIST_PETALS_ID, at(2019, 5, 21, 21, 30)),
        (VENUE_HOP_ID, ARTIST_QUEVEDO_ID, at(2035, 4, 1, 20, 0)),
        (VENUE_PIANOS_ID, ARTIST_SAX_ID, at(2035, 4, 8, 20, 0)),
        (VENUE_PIANOS_ID, ARTIST_SAX_ID, at(2035, 4, 15, 20, 0)),
    ];
    for (venue_id, artist_id, start_time) in shows {
        store.create_show(&NewShow {
            venue_id,
            artist_id,
            start_time,
        })?;
    }

    Ok((dir, db_path))
}
