//! Behaviour every `ListingStore` implementation must share. Each store's
//! test module runs these against a fresh instance.

use super::error::ListingStoreError;
use super::models::*;
use super::trait_def::ListingStore;
use chrono::{NaiveDate, NaiveDateTime};

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn venue_fields(name: &str) -> VenueFields {
    VenueFields {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: "123-123-1234".to_string(),
        genres: vec!["Jazz".to_string(), "Reggae".to_string()],
        ..Default::default()
    }
}

pub fn artist_fields(name: &str) -> ArtistFields {
    ArtistFields {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        genres: vec!["Rock n Roll".to_string()],
        ..Default::default()
    }
}

fn seed_show(store: &dyn ListingStore) -> (Venue, Artist, Show) {
    let venue = store.create_venue(&venue_fields("The Musical Hop")).unwrap();
    let artist = store.create_artist(&artist_fields("Guns N Petals")).unwrap();
    let show = store
        .create_show(&NewShow {
            venue_id: venue.id,
            artist_id: artist.id,
            start_time: at(2019, 5, 21, 21),
        })
        .unwrap();
    (venue, artist, show)
}

pub fn venue_crud(store: &dyn ListingStore) {
    let mut fields = venue_fields("  The Dueling Pianos Bar ");
    fields.genres.push(" Jazz".to_string());
    let created = store.create_venue(&fields).unwrap();
    assert_eq!(created.name, "The Dueling Pianos Bar");
    assert_eq!(created.genres, vec!["Jazz", "Reggae"]);
    assert_eq!(store.get_venue(created.id).unwrap(), Some(created.clone()));

    let mut changed = created.to_fields();
    changed.city = "New York".to_string();
    changed.state = "NY".to_string();
    changed.genres = vec!["Classical".to_string()];
    changed.seeking_talent = true;
    changed.seeking_description = "Looking for pianists".to_string();
    let updated = store.update_venue(created.id, &changed).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(store.get_venue(created.id).unwrap(), Some(updated.clone()));
    assert_eq!(store.list_venues().unwrap(), vec![updated]);

    store.delete_venue(created.id).unwrap();
    assert_eq!(store.get_venue(created.id).unwrap(), None);
    assert!(matches!(
        store.delete_venue(created.id),
        Err(ListingStoreError::NotFound {
            kind: ListingKind::Venue,
            ..
        })
    ));
}

pub fn artist_crud(store: &dyn ListingStore) {
    let first = store.create_artist(&artist_fields("Matt Quevedo")).unwrap();
    let second = store
        .create_artist(&artist_fields("The Wild Sax Band"))
        .unwrap();
    assert!(second.id > first.id);

    let mut changed = first.to_fields();
    changed.seeking_venue = true;
    changed.website = "https://example.com/matt".to_string();
    let updated = store.update_artist(first.id, &changed).unwrap();
    assert!(updated.seeking_venue);

    let names: Vec<String> = store
        .list_artists()
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Matt Quevedo", "The Wild Sax Band"]);

    store.delete_artist(first.id).unwrap();
    assert_eq!(store.get_artist(first.id).unwrap(), None);
    assert_eq!(store.counts().unwrap().artists, 1);
}

pub fn create_without_name_persists_nothing(store: &dyn ListingStore) {
    let before = store.counts().unwrap();

    let venue_err = store.create_venue(&venue_fields("   ")).unwrap_err();
    assert!(matches!(venue_err, ListingStoreError::Validation(_)));
    let artist_err = store.create_artist(&ArtistFields::default()).unwrap_err();
    assert!(matches!(artist_err, ListingStoreError::Validation(_)));

    assert_eq!(store.counts().unwrap(), before);
    assert!(store.list_venues().unwrap().is_empty());
}

pub fn update_missing_leaves_records_unchanged(store: &dyn ListingStore) {
    let venue = store.create_venue(&venue_fields("Park Square")).unwrap();
    let artist = store.create_artist(&artist_fields("Guns N Petals")).unwrap();

    let err = store
        .update_venue(venue.id + 100, &venue_fields("Somewhere Else"))
        .unwrap_err();
    assert!(matches!(err, ListingStoreError::NotFound { .. }));
    let err = store
        .update_artist(artist.id + 100, &artist_fields("Someone Else"))
        .unwrap_err();
    assert!(matches!(err, ListingStoreError::NotFound { .. }));

    // A failed validation on an existing record keeps the old values too.
    let err = store
        .update_venue(venue.id, &venue_fields(""))
        .unwrap_err();
    assert!(matches!(err, ListingStoreError::Validation(_)));

    assert_eq!(store.list_venues().unwrap(), vec![venue]);
    assert_eq!(store.list_artists().unwrap(), vec![artist]);
}

pub fn show_requires_existing_references(store: &dyn ListingStore) {
    let venue = store.create_venue(&venue_fields("The Musical Hop")).unwrap();
    let artist = store.create_artist(&artist_fields("Guns N Petals")).unwrap();

    let err = store
        .create_show(&NewShow {
            venue_id: venue.id,
            artist_id: artist.id + 10,
            start_time: at(2035, 4, 1, 20),
        })
        .unwrap_err();
    assert!(matches!(err, ListingStoreError::ReferentialIntegrity(_)));

    let err = store
        .create_show(&NewShow {
            venue_id: venue.id + 10,
            artist_id: artist.id,
            start_time: at(2035, 4, 1, 20),
        })
        .unwrap_err();
    assert!(matches!(err, ListingStoreError::ReferentialIntegrity(_)));

    assert_eq!(store.counts().unwrap().shows, 0);
}

pub fn show_listings_are_joined_and_ordered(store: &dyn ListingStore) {
    let hop = store.create_venue(&venue_fields("The Musical Hop")).unwrap();
    let park = store.create_venue(&venue_fields("Park Square")).unwrap();
    let petals = store.create_artist(&artist_fields("Guns N Petals")).unwrap();
    let sax = store
        .create_artist(&artist_fields("The Wild Sax Band"))
        .unwrap();

    let late = store
        .create_show(&NewShow {
            venue_id: park.id,
            artist_id: sax.id,
            start_time: at(2035, 4, 15, 20),
        })
        .unwrap();
    let early = store
        .create_show(&NewShow {
            venue_id: hop.id,
            artist_id: petals.id,
            start_time: at(2019, 5, 21, 21),
        })
        .unwrap();
    let same_time = store
        .create_show(&NewShow {
            venue_id: park.id,
            artist_id: petals.id,
            start_time: at(2035, 4, 15, 20),
        })
        .unwrap();

    let all: Vec<i64> = store.list_shows().unwrap().iter().map(|s| s.id).collect();
    assert_eq!(all, vec![early.id, late.id, same_time.id]);

    let at_park = store.shows_for_venue(park.id).unwrap();
    assert_eq!(at_park.len(), 2);
    assert!(at_park.iter().all(|s| s.venue_name == "Park Square"));

    let by_petals = store.shows_for_artist(petals.id).unwrap();
    assert_eq!(by_petals.len(), 2);
    assert_eq!(by_petals[0].venue_name, "The Musical Hop");
    assert_eq!(by_petals[0].artist_name, "Guns N Petals");
    assert_eq!(by_petals[0].start_time, at(2019, 5, 21, 21));
    assert_eq!(by_petals[1].venue_id, park.id);
}

pub fn reject_policy_keeps_shows(store: &dyn ListingStore) {
    let (venue, artist, _) = seed_show(store);
    let before = store.counts().unwrap();

    let err = store.delete_venue(venue.id).unwrap_err();
    assert!(matches!(err, ListingStoreError::ReferentialIntegrity(_)));
    let err = store.delete_artist(artist.id).unwrap_err();
    assert!(matches!(err, ListingStoreError::ReferentialIntegrity(_)));

    assert_eq!(store.counts().unwrap(), before);
    assert_eq!(store.shows_for_venue(venue.id).unwrap().len(), 1);
}

pub fn cascade_policy_removes_shows(store: &dyn ListingStore) {
    let (venue, artist, _) = seed_show(store);
    let other_venue = store.create_venue(&venue_fields("Park Square")).unwrap();
    store
        .create_show(&NewShow {
            venue_id: other_venue.id,
            artist_id: artist.id,
            start_time: at(2035, 4, 1, 20),
        })
        .unwrap();

    store.delete_venue(venue.id).unwrap();
    assert_eq!(store.get_venue(venue.id).unwrap(), None);
    assert_eq!(store.counts().unwrap().shows, 1);

    store.delete_artist(artist.id).unwrap();
    assert_eq!(store.counts().unwrap().shows, 0);
    assert_eq!(store.get_venue(other_venue.id).unwrap(), Some(other_venue));
}
