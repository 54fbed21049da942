//! In-memory listing store.
//!
//! Mirrors `SqliteListingStore` semantics without touching disk. Every
//! check runs before the first mutation, so a failed write leaves the
//! tables untouched.

use super::error::{ListingStoreError, StoreResult};
use super::models::*;
use super::trait_def::ListingStore;
use super::validation::{validate_artist, validate_venue};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    venues: BTreeMap<VenueId, Venue>,
    artists: BTreeMap<ArtistId, Artist>,
    shows: BTreeMap<ShowId, Show>,
    last_venue_id: VenueId,
    last_artist_id: ArtistId,
    last_show_id: ShowId,
}

impl Tables {
    fn listing(&self, show: &Show) -> Option<ShowListing> {
        let venue = self.venues.get(&show.venue_id)?;
        let artist = self.artists.get(&show.artist_id)?;
        Some(ShowListing {
            id: show.id,
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            venue_image_link: venue.image_link.clone(),
            artist_id: artist.id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: show.start_time,
        })
    }

    fn listings<F: Fn(&Show) -> bool>(&self, filter: F) -> Vec<ShowListing> {
        let mut listings: Vec<ShowListing> = self
            .shows
            .values()
            .filter(|s| filter(s))
            .filter_map(|s| self.listing(s))
            .collect();
        listings.sort_by_key(|l| (l.start_time, l.id));
        listings
    }
}

#[derive(Default)]
pub struct InMemoryListingStore {
    tables: Mutex<Tables>,
    delete_policy: DeletePolicy,
}

impl InMemoryListingStore {
    pub fn new(delete_policy: DeletePolicy) -> Self {
        InMemoryListingStore {
            tables: Mutex::new(Tables::default()),
            delete_policy,
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| ListingStoreError::Internal("listing tables poisoned".to_string()))
    }

    /// Ids of the shows that block (or go along with) deleting an owner.
    fn dependent_shows<F: Fn(&Show) -> bool>(
        &self,
        tables: &Tables,
        kind: ListingKind,
        id: i64,
        references: F,
    ) -> StoreResult<Vec<ShowId>> {
        let dependents: Vec<ShowId> = tables
            .shows
            .values()
            .filter(|s| references(s))
            .map(|s| s.id)
            .collect();
        if !dependents.is_empty() && self.delete_policy == DeletePolicy::Reject {
            return Err(ListingStoreError::ReferentialIntegrity(format!(
                "{} {} still has {} show(s)",
                kind,
                id,
                dependents.len()
            )));
        }
        Ok(dependents)
    }
}

impl ListingStore for InMemoryListingStore {
    fn create_venue(&self, fields: &VenueFields) -> StoreResult<Venue> {
        validate_venue(fields)?;
        let mut tables = self.lock()?;
        tables.last_venue_id += 1;
        let venue = Venue::from_fields(tables.last_venue_id, fields.normalized());
        tables.venues.insert(venue.id, venue.clone());
        Ok(venue)
    }

    fn get_venue(&self, id: VenueId) -> StoreResult<Option<Venue>> {
        Ok(self.lock()?.venues.get(&id).cloned())
    }

    fn update_venue(&self, id: VenueId, fields: &VenueFields) -> StoreResult<Venue> {
        validate_venue(fields)?;
        let mut tables = self.lock()?;
        let slot = tables
            .venues
            .get_mut(&id)
            .ok_or_else(|| ListingStoreError::not_found(ListingKind::Venue, id))?;
        *slot = Venue::from_fields(id, fields.normalized());
        Ok(slot.clone())
    }

    fn delete_venue(&self, id: VenueId) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if !tables.venues.contains_key(&id) {
            return Err(ListingStoreError::not_found(ListingKind::Venue, id));
        }
        let dependents =
            self.dependent_shows(&tables, ListingKind::Venue, id, |s| s.venue_id == id)?;
        for show_id in dependents {
            tables.shows.remove(&show_id);
        }
        tables.venues.remove(&id);
        Ok(())
    }

    fn list_venues(&self) -> StoreResult<Vec<Venue>> {
        Ok(self.lock()?.venues.values().cloned().collect())
    }

    fn create_artist(&self, fields: &ArtistFields) -> StoreResult<Artist> {
        validate_artist(fields)?;
        let mut tables = self.lock()?;
        tables.last_artist_id += 1;
        let artist = Artist::from_fields(tables.last_artist_id, fields.normalized());
        tables.artists.insert(artist.id, artist.clone());
        Ok(artist)
    }

    fn get_artist(&self, id: ArtistId) -> StoreResult<Option<Artist>> {
        Ok(self.lock()?.artists.get(&id).cloned())
    }

    fn update_artist(&self, id: ArtistId, fields: &ArtistFields) -> StoreResult<Artist> {
        validate_artist(fields)?;
        let mut tables = self.lock()?;
        let slot = tables
            .artists
            .get_mut(&id)
            .ok_or_else(|| ListingStoreError::not_found(ListingKind::Artist, id))?;
        *slot = Artist::from_fields(id, fields.normalized());
        Ok(slot.clone())
    }

    fn delete_artist(&self, id: ArtistId) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if !tables.artists.contains_key(&id) {
            return Err(ListingStoreError::not_found(ListingKind::Artist, id));
        }
        let dependents =
            self.dependent_shows(&tables, ListingKind::Artist, id, |s| s.artist_id == id)?;
        for show_id in dependents {
            tables.shows.remove(&show_id);
        }
        tables.artists.remove(&id);
        Ok(())
    }

    fn list_artists(&self) -> StoreResult<Vec<Artist>> {
        Ok(self.lock()?.artists.values().cloned().collect())
    }

    fn create_show(&self, show: &NewShow) -> StoreResult<Show> {
        let mut tables = self.lock()?;
        if !tables.venues.contains_key(&show.venue_id) {
            return Err(ListingStoreError::ReferentialIntegrity(format!(
                "venue {} does not exist",
                show.venue_id
            )));
        }
        if !tables.artists.contains_key(&show.artist_id) {
            return Err(ListingStoreError::ReferentialIntegrity(format!(
                "artist {} does not exist",
                show.artist_id
            )));
        }
        tables.last_show_id += 1;
        let show = Show {
            id: tables.last_show_id,
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: show.start_time,
        };
        tables.shows.insert(show.id, show.clone());
        Ok(show)
    }

    fn list_shows(&self) -> StoreResult<Vec<ShowListing>> {
        Ok(self.lock()?.listings(|_| true))
    }

    fn shows_for_venue(&self, venue_id: VenueId) -> StoreResult<Vec<ShowListing>> {
        Ok(self.lock()?.listings(|s| s.venue_id == venue_id))
    }

    fn shows_for_artist(&self, artist_id: ArtistId) -> StoreResult<Vec<ShowListing>> {
        Ok(self.lock()?.listings(|s| s.artist_id == artist_id))
    }

    fn counts(&self) -> StoreResult<ListingCounts> {
        let tables = self.lock()?;
        Ok(ListingCounts {
            venues: tables.venues.len(),
            artists: tables.artists.len(),
            shows: tables.shows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing_store::conformance;

    #[test]
    fn test_venue_crud() {
        conformance::venue_crud(&InMemoryListingStore::new(DeletePolicy::Reject));
    }

    #[test]
    fn test_artist_crud() {
        conformance::artist_crud(&InMemoryListingStore::new(DeletePolicy::Reject));
    }

    #[test]
    fn test_create_without_name_persists_nothing() {
        conformance::create_without_name_persists_nothing(&InMemoryListingStore::new(
            DeletePolicy::Reject,
        ));
    }

    #[test]
    fn test_update_missing_leaves_records_unchanged() {
        conformance::update_missing_leaves_records_unchanged(&InMemoryListingStore::new(
            DeletePolicy::Reject,
        ));
    }

    #[test]
    fn test_show_requires_existing_references() {
        conformance::show_requires_existing_references(&InMemoryListingStore::new(
            DeletePolicy::Reject,
        ));
    }

    #[test]
    fn test_show_listings_are_joined_and_ordered() {
        conformance::show_listings_are_joined_and_ordered(&InMemoryListingStore::new(
            DeletePolicy::Reject,
        ));
    }

    #[test]
    fn test_reject_policy_keeps_shows() {
        conformance::reject_policy_keeps_shows(&InMemoryListingStore::new(DeletePolicy::Reject));
    }

    #[test]
    fn test_cascade_policy_removes_shows() {
        conformance::cascade_policy_removes_shows(&InMemoryListingStore::new(
            DeletePolicy::Cascade,
        ));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryListingStore::new(DeletePolicy::Reject);
        let first = store
            .create_artist(&ArtistFields {
                name: "Guns N Petals".to_string(),
                ..Default::default()
            })
            .unwrap();
        store.delete_artist(first.id).unwrap();
        let second = store
            .create_artist(&ArtistFields {
                name: "Matt Quevedo".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert!(second.id > first.id);
    }
}
