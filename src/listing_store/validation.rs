//! Validation for listing entities.
//!
//! Runs before anything touches storage, so a rejected submission never
//! leaves partial state behind.

use super::models::{ArtistFields, VenueFields};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    InvalidValue { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            ValidationError::InvalidValue { field, value } => {
                write!(f, "Field '{}' has an invalid value '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn require_non_empty(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

pub fn validate_venue(fields: &VenueFields) -> ValidationResult<()> {
    require_non_empty("name", &fields.name)
}

pub fn validate_artist(fields: &ArtistFields) -> ValidationResult<()> {
    require_non_empty("name", &fields.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_with_name_is_valid() {
        let fields = VenueFields {
            name: "The Dueling Pianos Bar".to_string(),
            ..Default::default()
        };
        assert!(validate_venue(&fields).is_ok());
    }

    #[test]
    fn venue_without_name_is_rejected() {
        let err = validate_venue(&VenueFields::default()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField { field: "name" });
    }

    #[test]
    fn whitespace_only_artist_name_is_rejected() {
        let fields = ArtistFields {
            name: "   ".to_string(),
            ..Default::default()
        };
        let err = validate_artist(&fields).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { field: "name" }));
    }

    #[test]
    fn display_mentions_field() {
        let err = ValidationError::InvalidValue {
            field: "start_time",
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Field 'start_time' has an invalid value 'yesterday'"
        );
    }
}
