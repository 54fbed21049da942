use super::models::ListingKind;
use super::validation::ValidationError;
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, ListingStoreError>;

#[derive(Error, Debug)]
pub enum ListingStoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("No {kind} with id {id}")]
    NotFound { kind: ListingKind, id: i64 },

    /// A show would reference a missing record, or a delete would orphan shows.
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Internal store error: {0}")]
    Internal(String),
}

impl ListingStoreError {
    pub fn not_found(kind: ListingKind, id: i64) -> Self {
        ListingStoreError::NotFound { kind, id }
    }

    /// Short label for metrics and logs.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ListingStoreError::Validation(_) => "validation",
            ListingStoreError::NotFound { .. } => "not_found",
            ListingStoreError::ReferentialIntegrity(_) => "referential_integrity",
            ListingStoreError::Persistence(_) => "persistence",
            ListingStoreError::Internal(_) => "internal",
        }
    }
}
