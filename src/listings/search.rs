//! Case-insensitive substring search over entity names.

use crate::listing_store::{Artist, Venue};
use serde::Serialize;
use std::collections::HashMap;

/// An entity with an id and a display name.
pub trait Named {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

impl Named for Venue {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Artist {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

pub fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Every entity whose name contains `term`, ignoring case, in input order.
/// An empty term matches everything.
pub fn search_by_name<T: Named>(
    term: &str,
    entities: &[T],
    upcoming_counts: &HashMap<i64, usize>,
) -> SearchResults {
    let data: Vec<EntitySummary> = entities
        .iter()
        .filter(|e| name_matches(e.name(), term))
        .map(|e| EntitySummary {
            id: e.id(),
            name: e.name().to_string(),
            num_upcoming_shows: upcoming_counts.get(&e.id()).copied().unwrap_or(0),
        })
        .collect();
    SearchResults {
        count: data.len(),
        data,
    }
}
