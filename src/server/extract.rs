use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{Html, IntoResponse, Response},
};

use super::pages::not_found_page;

/// Numeric `{id}` path segment. Anything that is not an integer gets the
/// 404 page, same as an id that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

pub struct InvalidEntityId;

impl IntoResponse for InvalidEntityId {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Html(not_found_page())).into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = InvalidEntityId;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| InvalidEntityId)?;
        raw.parse::<i64>().map(EntityId).map_err(|_| InvalidEntityId)
    }
}
