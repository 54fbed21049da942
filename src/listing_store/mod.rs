//! Record store for venues, artists and shows.

#[cfg(test)]
pub(crate) mod conformance;
mod error;
mod memory_store;
mod models;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use error::{ListingStoreError, StoreResult};
pub use memory_store::InMemoryListingStore;
pub use models::*;
pub use store::SqliteListingStore;
pub use trait_def::ListingStore;
pub use validation::{validate_artist, validate_venue, ValidationError, ValidationResult};
