//! Past/upcoming classification of shows against one reference instant.
//!
//! Callers read the clock once and pass the same `now` to every function
//! here, so all shows in a response are classified consistently.

use crate::listing_store::{ArtistId, ShowListing, VenueId};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Anything with a start time that can be classified.
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

impl Scheduled for ShowListing {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for crate::listing_store::Show {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Scheduled for NaiveDateTime {
    fn start_time(&self) -> NaiveDateTime {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionedShows<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// A show starting exactly at `now` is upcoming.
pub fn is_upcoming(start_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    start_time >= now
}

/// Stable partition into past (`start_time < now`) and upcoming.
pub fn partition_shows<T, I>(shows: I, now: NaiveDateTime) -> PartitionedShows<T>
where
    T: Scheduled,
    I: IntoIterator<Item = T>,
{
    let (upcoming, past) = shows
        .into_iter()
        .partition(|show| is_upcoming(show.start_time(), now));
    PartitionedShows { past, upcoming }
}

pub fn count_upcoming<'a, T, I>(shows: I, now: NaiveDateTime) -> usize
where
    T: Scheduled + 'a,
    I: IntoIterator<Item = &'a T>,
{
    shows
        .into_iter()
        .filter(|show| is_upcoming(show.start_time(), now))
        .count()
}

fn upcoming_counts_by<K, F>(shows: &[ShowListing], now: NaiveDateTime, key: F) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
    F: Fn(&ShowListing) -> K,
{
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|s| is_upcoming(s.start_time, now)) {
        *counts.entry(key(show)).or_insert(0) += 1;
    }
    counts
}

/// Upcoming-show count per venue. Venues without upcoming shows are absent.
pub fn upcoming_counts_by_venue(shows: &[ShowListing], now: NaiveDateTime) -> HashMap<VenueId, usize> {
    upcoming_counts_by(shows, now, |s| s.venue_id)
}

pub fn upcoming_counts_by_artist(
    shows: &[ShowListing],
    now: NaiveDateTime,
) -> HashMap<ArtistId, usize> {
    upcoming_counts_by(shows, now, |s| s.artist_id)
}
