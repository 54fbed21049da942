//! Form payloads submitted by the create/edit pages.
//!
//! Decoded with `axum_extra::extract::Form` so that repeated `genres` keys
//! become a list. Absent text fields decode as empty strings.

use crate::listing_store::{ArtistFields, NewShow, ValidationError, ValidationResult, VenueFields};
use crate::listings::parse_start_time;
use serde::Deserialize;

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// HTML only submits a checkbox when it is ticked.
fn checkbox(value: &Option<String>) -> bool {
    match value.as_deref().map(str::trim) {
        None => false,
        Some(v) => !matches!(
            v.to_ascii_lowercase().as_str(),
            "" | "false" | "off" | "n" | "no" | "0"
        ),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn into_fields(self) -> VenueFields {
        VenueFields {
            seeking_talent: checkbox(&self.seeking_talent),
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            website: self.website,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            genres: self.genres,
            seeking_description: self.seeking_description,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn into_fields(self) -> ArtistFields {
        ArtistFields {
            seeking_venue: checkbox(&self.seeking_venue),
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            website: self.website,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            genres: self.genres,
            seeking_description: self.seeking_description,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

fn parse_id(field: &'static str, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidValue {
            field,
            value: raw.to_string(),
        })
}

impl ShowForm {
    pub fn to_new_show(&self) -> ValidationResult<NewShow> {
        Ok(NewShow {
            artist_id: parse_id("artist_id", &self.artist_id)?,
            venue_id: parse_id("venue_id", &self.venue_id)?,
            start_time: parse_start_time(&self.start_time)?,
        })
    }
}
