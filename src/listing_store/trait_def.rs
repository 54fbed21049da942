//! ListingStore trait definition.
//!
//! Handlers and view builders only ever see `dyn ListingStore`, so the
//! SQLite store and the in-memory store are interchangeable.

use super::error::StoreResult;
use super::models::*;

/// Storage backend for venues, artists and shows.
///
/// Every write is all-or-nothing: when a method returns an error the
/// store is left exactly as it was before the call.
pub trait ListingStore: Send + Sync {
    // =========================================================================
    // Venues
    // =========================================================================

    /// Validate and persist a new venue, returning it with its assigned id.
    fn create_venue(&self, fields: &VenueFields) -> StoreResult<Venue>;

    /// Get a venue by id. `Ok(None)` when there is no such venue.
    fn get_venue(&self, id: VenueId) -> StoreResult<Option<Venue>>;

    /// Replace every mutable field of an existing venue.
    fn update_venue(&self, id: VenueId, fields: &VenueFields) -> StoreResult<Venue>;

    /// Delete a venue, honouring the store's `DeletePolicy` for its shows.
    fn delete_venue(&self, id: VenueId) -> StoreResult<()>;

    /// All venues ordered by id.
    fn list_venues(&self) -> StoreResult<Vec<Venue>>;

    // =========================================================================
    // Artists
    // =========================================================================

    fn create_artist(&self, fields: &ArtistFields) -> StoreResult<Artist>;

    fn get_artist(&self, id: ArtistId) -> StoreResult<Option<Artist>>;

    fn update_artist(&self, id: ArtistId, fields: &ArtistFields) -> StoreResult<Artist>;

    fn delete_artist(&self, id: ArtistId) -> StoreResult<()>;

    fn list_artists(&self) -> StoreResult<Vec<Artist>>;

    // =========================================================================
    // Shows
    // =========================================================================

    /// Persist a show. Fails with `ReferentialIntegrity` when the venue or
    /// artist does not exist.
    fn create_show(&self, show: &NewShow) -> StoreResult<Show>;

    /// All shows joined with their venue and artist, ordered by start time.
    fn list_shows(&self) -> StoreResult<Vec<ShowListing>>;

    fn shows_for_venue(&self, venue_id: VenueId) -> StoreResult<Vec<ShowListing>>;

    fn shows_for_artist(&self, artist_id: ArtistId) -> StoreResult<Vec<ShowListing>>;

    // =========================================================================
    // Counts (for metrics and the home page)
    // =========================================================================

    fn counts(&self) -> StoreResult<ListingCounts>;
}
