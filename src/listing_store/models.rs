//! Listing models: venues, artists and the shows that join them.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type VenueId = i64;
pub type ArtistId = i64;
pub type ShowId = i64;

/// Which kind of listing an id refers to, for error reporting.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Venue,
    Artist,
    Show,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Venue => "venue",
            ListingKind::Artist => "artist",
            ListingKind::Show => "show",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to a venue's or artist's shows when the owner is deleted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Refuse to delete while shows still reference the record.
    #[default]
    Reject,
    /// Delete the referencing shows in the same transaction.
    Cascade,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub image_link: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// Every mutable field of a venue. Edits replace all of them at once.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub image_link: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl Venue {
    pub fn from_fields(id: VenueId, fields: VenueFields) -> Self {
        Venue {
            id,
            name: fields.name,
            city: fields.city,
            state: fields.state,
            address: fields.address,
            phone: fields.phone,
            website: fields.website,
            image_link: fields.image_link,
            facebook_link: fields.facebook_link,
            genres: fields.genres,
            seeking_talent: fields.seeking_talent,
            seeking_description: fields.seeking_description,
        }
    }

    pub fn to_fields(&self) -> VenueFields {
        VenueFields {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            genres: self.genres.clone(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub image_link: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

/// Every mutable field of an artist. Edits replace all of them at once.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub image_link: String,
    pub facebook_link: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl Artist {
    pub fn from_fields(id: ArtistId, fields: ArtistFields) -> Self {
        Artist {
            id,
            name: fields.name,
            city: fields.city,
            state: fields.state,
            phone: fields.phone,
            website: fields.website,
            image_link: fields.image_link,
            facebook_link: fields.facebook_link,
            genres: fields.genres,
            seeking_venue: fields.seeking_venue,
            seeking_description: fields.seeking_description,
        }
    }

    pub fn to_fields(&self) -> ArtistFields {
        ArtistFields {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            genres: self.genres.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Show {
    pub id: ShowId,
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: NaiveDateTime,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewShow {
    pub venue_id: VenueId,
    pub artist_id: ArtistId,
    pub start_time: NaiveDateTime,
}

/// A show resolved together with the venue and artist it references.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ShowListing {
    pub id: ShowId,
    pub venue_id: VenueId,
    pub venue_name: String,
    pub venue_image_link: String,
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ListingCounts {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

/// Start times are naive wall-clock values in the server's zone. The column
/// holds them encoded as Unix seconds, with no offset applied.
pub fn start_time_to_db(start_time: &NaiveDateTime) -> i64 {
    start_time.and_utc().timestamp()
}

pub fn start_time_from_db(seconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

impl VenueFields {
    /// The form the stores persist: trimmed name, cleaned-up genres.
    pub fn normalized(&self) -> VenueFields {
        VenueFields {
            name: self.name.trim().to_string(),
            genres: normalize_genres(&self.genres),
            ..self.clone()
        }
    }
}

impl ArtistFields {
    pub fn normalized(&self) -> ArtistFields {
        ArtistFields {
            name: self.name.trim().to_string(),
            genres: normalize_genres(&self.genres),
            ..self.clone()
        }
    }
}

/// Trims each tag, drops empty ones and keeps the first occurrence of duplicates.
pub fn normalize_genres(genres: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        let genre = genre.trim();
        if genre.is_empty() || out.iter().any(|g| g == genre) {
            continue;
        }
        out.push(genre.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn start_time_survives_db_conversion() {
        let start = NaiveDate::from_ymd_opt(2035, 4, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let seconds = start_time_to_db(&start);
        assert_eq!(start_time_from_db(seconds), Some(start));
    }

    #[test]
    fn normalize_genres_trims_and_dedups() {
        let genres = vec![
            " Jazz".to_string(),
            "Blues".to_string(),
            "".to_string(),
            "Jazz".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(normalize_genres(&genres), vec!["Jazz", "Blues"]);
    }

    #[test]
    fn fields_round_trip_through_venue() {
        let fields = VenueFields {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            genres: vec!["Jazz".to_string()],
            seeking_talent: true,
            ..Default::default()
        };
        let venue = Venue::from_fields(7, fields.clone());
        assert_eq!(venue.id, 7);
        assert_eq!(venue.to_fields(), fields);
    }
}
