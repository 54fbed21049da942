//! SQLite-backed listing store.
//!
//! A single connection guarded by a mutex; every write runs inside one
//! transaction that is only committed once all statements succeeded.

use super::error::{ListingStoreError, StoreResult};
use super::models::*;
use super::schema::LISTINGS_VERSIONED_SCHEMAS;
use super::trait_def::ListingStore;
use super::validation::{validate_artist, validate_venue};
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

const VENUE_COLUMNS: &str = "id, name, city, state, address, phone, website, image_link,
     facebook_link, seeking_talent, seeking_description";

const ARTIST_COLUMNS: &str = "id, name, city, state, phone, website, image_link,
     facebook_link, seeking_venue, seeking_description";

const SHOW_LISTING_SELECT: &str = "SELECT s.id, s.venue_id, v.name, v.image_link,
            s.artist_id, a.name, a.image_link, s.start_time
     FROM shows s
     INNER JOIN venues v ON v.id = s.venue_id
     INNER JOIN artists a ON a.id = s.artist_id";

/// Which genre table a genre list belongs to.
#[derive(Clone, Copy)]
enum GenreOwner {
    Venue,
    Artist,
}

impl GenreOwner {
    fn table(&self) -> &'static str {
        match self {
            GenreOwner::Venue => "venue_genres",
            GenreOwner::Artist => "artist_genres",
        }
    }

    fn owner_column(&self) -> &'static str {
        match self {
            GenreOwner::Venue => "venue_id",
            GenreOwner::Artist => "artist_id",
        }
    }
}

#[derive(Clone)]
pub struct SqliteListingStore {
    conn: Arc<Mutex<Connection>>,
    delete_policy: DeletePolicy,
}

fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;

    let latest_version = LISTINGS_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &LISTINGS_VERSIONED_SCHEMAS[latest_version];

    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    if table_count == 0 {
        info!("Creating listings db schema at version {}", latest_version);
        let tx = conn.transaction()?;
        latest_schema.create(&tx)?;
        tx.commit()?;
        return Ok(());
    }

    if db_version < BASE_DB_VERSION as i64 {
        bail!(
            "Database has user_version {} and was not created by this server",
            db_version
        );
    }

    let mut current_version = (db_version - BASE_DB_VERSION as i64) as usize;
    if current_version > latest_version {
        bail!(
            "Database schema version {} is newer than the latest known version {}",
            current_version,
            latest_version
        );
    }

    if current_version < latest_version {
        let tx = conn.transaction()?;
        for schema in LISTINGS_VERSIONED_SCHEMAS.iter().skip(current_version + 1) {
            if let Some(migration_fn) = schema.migration {
                info!(
                    "Migrating listings db from version {} to {}",
                    current_version, schema.version
                );
                migration_fn(&tx)?;
            }
            current_version = schema.version;
        }
        tx.pragma_update(None, "user_version", BASE_DB_VERSION + current_version)?;
        tx.commit()?;
    }

    latest_schema
        .validate(conn)
        .context("Listings database does not match the expected schema")
}

/// SQLite reports foreign key failures as constraint violations; those are
/// integrity problems, not storage failures.
fn map_write_error(err: rusqlite::Error) -> ListingStoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, message)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            ListingStoreError::ReferentialIntegrity(
                message
                    .clone()
                    .unwrap_or_else(|| "constraint violation".to_string()),
            )
        }
        _ => ListingStoreError::Persistence(err),
    }
}

impl SqliteListingStore {
    /// Open (or create) the listings database at `db_path`.
    pub fn new<P: AsRef<Path>>(db_path: P, delete_policy: DeletePolicy) -> Result<Self> {
        let mut conn = Connection::open_with_flags(
            db_path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open listings database")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn, delete_policy)
    }

    /// A private, throwaway database. Used by tests.
    pub fn open_in_memory(delete_policy: DeletePolicy) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, delete_policy)
    }

    fn from_connection(mut conn: Connection, delete_policy: DeletePolicy) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        migrate_if_needed(&mut conn)?;

        let store = SqliteListingStore {
            conn: Arc::new(Mutex::new(conn)),
            delete_policy,
        };
        let counts = store.counts()?;
        info!(
            "Opened listings db: {} venues, {} artists, {} shows (delete policy: {:?})",
            counts.venues, counts.artists, counts.shows, delete_policy
        );
        Ok(store)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ListingStoreError::Internal("listings connection poisoned".to_string()))
    }

    // =========================================================================
    // Internal Helper Methods
    // =========================================================================

    fn write_genres(
        conn: &Connection,
        owner: GenreOwner,
        owner_id: i64,
        genres: &[String],
    ) -> rusqlite::Result<()> {
        conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1",
                owner.table(),
                owner.owner_column()
            ),
            params![owner_id],
        )?;
        let mut stmt = conn.prepare_cached(&format!(
            "INSERT INTO {} ({}, position, genre) VALUES (?1, ?2, ?3)",
            owner.table(),
            owner.owner_column()
        ))?;
        for (position, genre) in genres.iter().enumerate() {
            stmt.execute(params![owner_id, position as i64, genre])?;
        }
        Ok(())
    }

    fn read_genres(conn: &Connection, owner: GenreOwner, owner_id: i64) -> rusqlite::Result<Vec<String>> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT genre FROM {} WHERE {} = ?1 ORDER BY position",
            owner.table(),
            owner.owner_column()
        ))?;
        let genres = stmt
            .query_map(params![owner_id], |r| r.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(genres)
    }

    fn read_all_genres(
        conn: &Connection,
        owner: GenreOwner,
    ) -> rusqlite::Result<HashMap<i64, Vec<String>>> {
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {}, genre FROM {} ORDER BY {}, position",
            owner.owner_column(),
            owner.table(),
            owner.owner_column()
        ))?;
        let mut genres: HashMap<i64, Vec<String>> = HashMap::new();
        let rows = stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?)))?;
        for row in rows {
            let (owner_id, genre) = row?;
            genres.entry(owner_id).or_default().push(genre);
        }
        Ok(genres)
    }

    fn exists(conn: &Connection, table: &str, id: i64) -> rusqlite::Result<bool> {
        conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", table),
            params![id],
            |r| r.get(0),
        )
    }

    fn count_shows_by(conn: &Connection, owner_column: &str, id: i64) -> rusqlite::Result<i64> {
        conn.query_row(
            &format!("SELECT COUNT(*) FROM shows WHERE {} = ?1", owner_column),
            params![id],
            |r| r.get(0),
        )
    }

    fn parse_venue_row(row: &Row, genres: Vec<String>) -> rusqlite::Result<Venue> {
        Ok(Venue {
            id: row.get(0)?,
            name: row.get(1)?,
            city: row.get(2)?,
            state: row.get(3)?,
            address: row.get(4)?,
            phone: row.get(5)?,
            website: row.get(6)?,
            image_link: row.get(7)?,
            facebook_link: row.get(8)?,
            seeking_talent: row.get::<_, i32>(9)? != 0,
            seeking_description: row.get(10)?,
            genres,
        })
    }

    fn parse_artist_row(row: &Row, genres: Vec<String>) -> rusqlite::Result<Artist> {
        Ok(Artist {
            id: row.get(0)?,
            name: row.get(1)?,
            city: row.get(2)?,
            state: row.get(3)?,
            phone: row.get(4)?,
            website: row.get(5)?,
            image_link: row.get(6)?,
            facebook_link: row.get(7)?,
            seeking_venue: row.get::<_, i32>(8)? != 0,
            seeking_description: row.get(9)?,
            genres,
        })
    }

    fn parse_show_listing_row(row: &Row) -> rusqlite::Result<ShowListing> {
        let seconds: i64 = row.get(7)?;
        let start_time = start_time_from_db(seconds)
            .ok_or(rusqlite::Error::IntegralValueOutOfRange(7, seconds))?;
        Ok(ShowListing {
            id: row.get(0)?,
            venue_id: row.get(1)?,
            venue_name: row.get(2)?,
            venue_image_link: row.get(3)?,
            artist_id: row.get(4)?,
            artist_name: row.get(5)?,
            artist_image_link: row.get(6)?,
            start_time,
        })
    }

    fn query_show_listings(
        conn: &Connection,
        filter: Option<(&str, i64)>,
    ) -> rusqlite::Result<Vec<ShowListing>> {
        let sql = match filter {
            Some((column, _)) => format!(
                "{} WHERE s.{} = ?1 ORDER BY s.start_time, s.id",
                SHOW_LISTING_SELECT, column
            ),
            None => format!("{} ORDER BY s.start_time, s.id", SHOW_LISTING_SELECT),
        };
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = match filter {
            Some((_, id)) => stmt.query_map(params![id], Self::parse_show_listing_row)?,
            None => stmt.query_map([], Self::parse_show_listing_row)?,
        };
        rows.collect()
    }

    fn delete_owner(&self, kind: ListingKind, id: i64) -> StoreResult<()> {
        let (table, owner_column) = match kind {
            ListingKind::Venue => ("venues", "venue_id"),
            ListingKind::Artist => ("artists", "artist_id"),
            ListingKind::Show => {
                return Err(ListingStoreError::Internal(
                    "shows are never deleted".to_string(),
                ))
            }
        };

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        if !Self::exists(&tx, table, id)? {
            return Err(ListingStoreError::not_found(kind, id));
        }

        let show_count = Self::count_shows_by(&tx, owner_column, id)?;
        if show_count > 0 {
            match self.delete_policy {
                DeletePolicy::Reject => {
                    return Err(ListingStoreError::ReferentialIntegrity(format!(
                        "{} {} still has {} show(s)",
                        kind, id, show_count
                    )));
                }
                DeletePolicy::Cascade => {
                    debug!("Cascading delete of {} show(s) for {} {}", show_count, kind, id);
                    tx.execute(
                        &format!("DELETE FROM shows WHERE {} = ?1", owner_column),
                        params![id],
                    )
                    .map_err(map_write_error)?;
                }
            }
        }

        tx.execute(&format!("DELETE FROM {} WHERE id = ?1", table), params![id])
            .map_err(map_write_error)?;
        tx.commit()?;
        Ok(())
    }
}

impl ListingStore for SqliteListingStore {
    // =========================================================================
    // Venues
    // =========================================================================

    fn create_venue(&self, fields: &VenueFields) -> StoreResult<Venue> {
        validate_venue(fields)?;
        let fields = fields.normalized();

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO venues (name, city, state, address, phone, website, image_link,
                                 facebook_link, seeking_talent, seeking_description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                fields.name,
                fields.city,
                fields.state,
                fields.address,
                fields.phone,
                fields.website,
                fields.image_link,
                fields.facebook_link,
                fields.seeking_talent as i32,
                fields.seeking_description,
            ],
        )
        .map_err(map_write_error)?;
        let id = tx.last_insert_rowid();
        Self::write_genres(&tx, GenreOwner::Venue, id, &fields.genres)?;
        tx.commit()?;

        Ok(Venue::from_fields(id, fields))
    }

    fn get_venue(&self, id: VenueId) -> StoreResult<Option<Venue>> {
        let conn = self.lock()?;
        let genres = Self::read_genres(&conn, GenreOwner::Venue, id)?;
        let mut stmt =
            conn.prepare_cached(&format!("SELECT {} FROM venues WHERE id = ?1", VENUE_COLUMNS))?;
        match stmt.query_row(params![id], |row| Self::parse_venue_row(row, genres.clone())) {
            Ok(venue) => Ok(Some(venue)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn update_venue(&self, id: VenueId, fields: &VenueFields) -> StoreResult<Venue> {
        validate_venue(fields)?;
        let fields = fields.normalized();

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let updated = tx
            .execute(
                "UPDATE venues SET name = ?1, city = ?2, state = ?3, address = ?4, phone = ?5,
                        website = ?6, image_link = ?7, facebook_link = ?8,
                        seeking_talent = ?9, seeking_description = ?10
                 WHERE id = ?11",
                params![
                    fields.name,
                    fields.city,
                    fields.state,
                    fields.address,
                    fields.phone,
                    fields.website,
                    fields.image_link,
                    fields.facebook_link,
                    fields.seeking_talent as i32,
                    fields.seeking_description,
                    id,
                ],
            )
            .map_err(map_write_error)?;
        if updated == 0 {
            return Err(ListingStoreError::not_found(ListingKind::Venue, id));
        }
        Self::write_genres(&tx, GenreOwner::Venue, id, &fields.genres)?;
        tx.commit()?;

        Ok(Venue::from_fields(id, fields))
    }

    fn delete_venue(&self, id: VenueId) -> StoreResult<()> {
        self.delete_owner(ListingKind::Venue, id)
    }

    fn list_venues(&self) -> StoreResult<Vec<Venue>> {
        let conn = self.lock()?;
        let mut genres = Self::read_all_genres(&conn, GenreOwner::Venue)?;
        let mut stmt =
            conn.prepare_cached(&format!("SELECT {} FROM venues ORDER BY id", VENUE_COLUMNS))?;
        let venues = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                Self::parse_venue_row(row, genres.remove(&id).unwrap_or_default())
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(venues)
    }

    // =========================================================================
    // Artists
    // =========================================================================

    fn create_artist(&self, fields: &ArtistFields) -> StoreResult<Artist> {
        validate_artist(fields)?;
        let fields = fields.normalized();

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO artists (name, city, state, phone, website, image_link,
                                  facebook_link, seeking_venue, seeking_description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                fields.name,
                fields.city,
                fields.state,
                fields.phone,
                fields.website,
                fields.image_link,
                fields.facebook_link,
                fields.seeking_venue as i32,
                fields.seeking_description,
            ],
        )
        .map_err(map_write_error)?;
        let id = tx.last_insert_rowid();
        Self::write_genres(&tx, GenreOwner::Artist, id, &fields.genres)?;
        tx.commit()?;

        Ok(Artist::from_fields(id, fields))
    }

    fn get_artist(&self, id: ArtistId) -> StoreResult<Option<Artist>> {
        let conn = self.lock()?;
        let genres = Self::read_genres(&conn, GenreOwner::Artist, id)?;
        let mut stmt = conn
            .prepare_cached(&format!("SELECT {} FROM artists WHERE id = ?1", ARTIST_COLUMNS))?;
        match stmt.query_row(params![id], |row| Self::parse_artist_row(row, genres.clone())) {
            Ok(artist) => Ok(Some(artist)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn update_artist(&self, id: ArtistId, fields: &ArtistFields) -> StoreResult<Artist> {
        validate_artist(fields)?;
        let fields = fields.normalized();

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let updated = tx
            .execute(
                "UPDATE artists SET name = ?1, city = ?2, state = ?3, phone = ?4, website = ?5,
                        image_link = ?6, facebook_link = ?7, seeking_venue = ?8,
                        seeking_description = ?9
                 WHERE id = ?10",
                params![
                    fields.name,
                    fields.city,
                    fields.state,
                    fields.phone,
                    fields.website,
                    fields.image_link,
                    fields.facebook_link,
                    fields.seeking_venue as i32,
                    fields.seeking_description,
                    id,
                ],
            )
            .map_err(map_write_error)?;
        if updated == 0 {
            return Err(ListingStoreError::not_found(ListingKind::Artist, id));
        }
        Self::write_genres(&tx, GenreOwner::Artist, id, &fields.genres)?;
        tx.commit()?;

        Ok(Artist::from_fields(id, fields))
    }

    fn delete_artist(&self, id: ArtistId) -> StoreResult<()> {
        self.delete_owner(ListingKind::Artist, id)
    }

    fn list_artists(&self) -> StoreResult<Vec<Artist>> {
        let conn = self.lock()?;
        let mut genres = Self::read_all_genres(&conn, GenreOwner::Artist)?;
        let mut stmt =
            conn.prepare_cached(&format!("SELECT {} FROM artists ORDER BY id", ARTIST_COLUMNS))?;
        let artists = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                Self::parse_artist_row(row, genres.remove(&id).unwrap_or_default())
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    // =========================================================================
    // Shows
    // =========================================================================

    fn create_show(&self, show: &NewShow) -> StoreResult<Show> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        if !Self::exists(&tx, "venues", show.venue_id)? {
            return Err(ListingStoreError::ReferentialIntegrity(format!(
                "venue {} does not exist",
                show.venue_id
            )));
        }
        if !Self::exists(&tx, "artists", show.artist_id)? {
            return Err(ListingStoreError::ReferentialIntegrity(format!(
                "artist {} does not exist",
                show.artist_id
            )));
        }

        tx.execute(
            "INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?1, ?2, ?3)",
            params![
                show.venue_id,
                show.artist_id,
                start_time_to_db(&show.start_time)
            ],
        )
        .map_err(map_write_error)?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Show {
            id,
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: show.start_time,
        })
    }

    fn list_shows(&self) -> StoreResult<Vec<ShowListing>> {
        let conn = self.lock()?;
        Ok(Self::query_show_listings(&conn, None)?)
    }

    fn shows_for_venue(&self, venue_id: VenueId) -> StoreResult<Vec<ShowListing>> {
        let conn = self.lock()?;
        Ok(Self::query_show_listings(&conn, Some(("venue_id", venue_id)))?)
    }

    fn shows_for_artist(&self, artist_id: ArtistId) -> StoreResult<Vec<ShowListing>> {
        let conn = self.lock()?;
        Ok(Self::query_show_listings(&conn, Some(("artist_id", artist_id)))?)
    }

    fn counts(&self) -> StoreResult<ListingCounts> {
        let conn = self.lock()?;
        let count = |table: &str| -> rusqlite::Result<usize> {
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                r.get::<_, i64>(0)
            })
            .map(|n| n as usize)
        };
        Ok(ListingCounts {
            venues: count("venues")?,
            artists: count("artists")?,
            shows: count("shows")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing_store::conformance;
    use tempfile::TempDir;

    fn reject_store() -> SqliteListingStore {
        SqliteListingStore::open_in_memory(DeletePolicy::Reject).unwrap()
    }

    fn cascade_store() -> SqliteListingStore {
        SqliteListingStore::open_in_memory(DeletePolicy::Cascade).unwrap()
    }

    #[test]
    fn test_venue_crud() {
        conformance::venue_crud(&reject_store());
    }

    #[test]
    fn test_artist_crud() {
        conformance::artist_crud(&reject_store());
    }

    #[test]
    fn test_create_without_name_persists_nothing() {
        conformance::create_without_name_persists_nothing(&reject_store());
    }

    #[test]
    fn test_update_missing_leaves_records_unchanged() {
        conformance::update_missing_leaves_records_unchanged(&reject_store());
    }

    #[test]
    fn test_show_requires_existing_references() {
        conformance::show_requires_existing_references(&reject_store());
    }

    #[test]
    fn test_show_listings_are_joined_and_ordered() {
        conformance::show_listings_are_joined_and_ordered(&reject_store());
    }

    #[test]
    fn test_reject_policy_keeps_shows() {
        conformance::reject_policy_keeps_shows(&reject_store());
    }

    #[test]
    fn test_cascade_policy_removes_shows() {
        conformance::cascade_policy_removes_shows(&cascade_store());
    }

    #[test]
    fn test_reopening_file_keeps_data() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("listings.db");

        let id = {
            let store = SqliteListingStore::new(&db_path, DeletePolicy::Reject).unwrap();
            store
                .create_venue(&VenueFields {
                    name: "The Fillmore".to_string(),
                    city: "San Francisco".to_string(),
                    state: "CA".to_string(),
                    genres: vec!["Rock n Roll".to_string()],
                    ..Default::default()
                })
                .unwrap()
                .id
        };

        let store = SqliteListingStore::new(&db_path, DeletePolicy::Reject).unwrap();
        let venue = store.get_venue(id).unwrap().unwrap();
        assert_eq!(venue.name, "The Fillmore");
        assert_eq!(venue.genres, vec!["Rock n Roll"]);
    }

    #[test]
    fn test_foreign_database_is_refused() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("other.db");
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute("CREATE TABLE something (id INTEGER)", [])
                .unwrap();
        }

        let result = SqliteListingStore::new(&db_path, DeletePolicy::Reject);
        assert!(result.is_err());
    }
}
