//! Gigboard server library
//!
//! Venue, artist and show listings behind an HTML front end. The modules
//! are exposed for the end-to-end tests.

pub mod config;
pub mod listing_store;
pub mod listings;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use listing_store::{
    DeletePolicy, InMemoryListingStore, ListingStore, ListingStoreError, SqliteListingStore,
};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
