use axum::extract::FromRef;

use crate::listing_store::ListingStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedListingStore = Arc<dyn ListingStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub listing_store: GuardedListingStore,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, listing_store: GuardedListingStore) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            listing_store,
            hash: env!("GIGBOARD_BUILD_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedListingStore {
    fn from_ref(input: &ServerState) -> Self {
        input.listing_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
