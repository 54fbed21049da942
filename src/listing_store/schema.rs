//! SQLite schema definitions for the listings database.
//!
//! Genres live in their own tables with an explicit position so that the
//! order a user picked them in is preserved. Shows reference venues and
//! artists with RESTRICT foreign keys; cascading is an explicit store
//! decision, never something SQLite does behind our back.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

const VENUES_TABLE: Table = Table {
    name: "venues",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("city", &SqlType::Text, non_null = true),
        sqlite_column!("state", &SqlType::Text, non_null = true),
        sqlite_column!("address", &SqlType::Text, non_null = true),
        sqlite_column!("phone", &SqlType::Text, non_null = true),
        sqlite_column!("website", &SqlType::Text, non_null = true),
        sqlite_column!("image_link", &SqlType::Text, non_null = true),
        sqlite_column!("facebook_link", &SqlType::Text, non_null = true),
        sqlite_column!(
            "seeking_talent",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!("seeking_description", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_venues_city_state", "city, state")],
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("city", &SqlType::Text, non_null = true),
        sqlite_column!("state", &SqlType::Text, non_null = true),
        sqlite_column!("phone", &SqlType::Text, non_null = true),
        sqlite_column!("website", &SqlType::Text, non_null = true),
        sqlite_column!("image_link", &SqlType::Text, non_null = true),
        sqlite_column!("facebook_link", &SqlType::Text, non_null = true),
        sqlite_column!(
            "seeking_venue",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!("seeking_description", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const VENUE_GENRES_TABLE: Table = Table {
    name: "venue_genres",
    columns: &[
        sqlite_column!(
            "venue_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "venues",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
        sqlite_column!("genre", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_venue_genres_venue", "venue_id")],
};

const ARTIST_GENRES_TABLE: Table = Table {
    name: "artist_genres",
    columns: &[
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "artists",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
        sqlite_column!("genre", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_artist_genres_artist", "artist_id")],
};

const SHOWS_TABLE: Table = Table {
    name: "shows",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "venue_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "venues",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "artists",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
        // Wall-clock time encoded as Unix seconds
        sqlite_column!("start_time", &SqlType::Integer, non_null = true),
    ],
    indices: &[
        ("idx_shows_venue", "venue_id"),
        ("idx_shows_artist", "artist_id"),
        ("idx_shows_start_time", "start_time"),
    ],
};

pub const LISTINGS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        VENUES_TABLE,
        ARTISTS_TABLE,
        VENUE_GENRES_TABLE,
        ARTIST_GENRES_TABLE,
        SHOWS_TABLE,
    ],
    migration: None,
}];
