//! Listing logic that sits between the store and the pages.

pub mod directory;
pub mod operations;
pub mod search;
pub mod show_classifier;

pub use directory::{build_directory, CityArea, VenueSummary};
pub use operations::*;
pub use search::{search_by_name, EntitySummary, Named, SearchResults};
pub use show_classifier::{
    count_upcoming, is_upcoming, partition_shows, upcoming_counts_by_artist,
    upcoming_counts_by_venue, PartitionedShows, Scheduled,
};
