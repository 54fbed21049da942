//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per gigboard route. When routes or form
//! fields change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::fmt::Display;
use std::time::Duration;

/// HTTP test client. Keeps cookies so flash messages survive redirects.
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    /// Creates a client that follows redirects like a browser would.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client that hands redirects back to the test.
    pub fn without_redirects(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET an arbitrary path
    pub async fn get_path(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    async fn delete_path(&self, path: &str) -> Response {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.get_path("/").await
    }

    // ========================================================================
    // Venues
    // ========================================================================

    /// GET /venues
    pub async fn get_venues(&self) -> Response {
        self.get_path("/venues").await
    }

    /// GET /venues/{id}
    pub async fn get_venue(&self, id: impl Display) -> Response {
        self.get_path(&format!("/venues/{}", id)).await
    }

    /// POST /venues/search
    pub async fn search_venues(&self, term: &str) -> Response {
        self.post_form("/venues/search", &[("search_term", term)])
            .await
    }

    /// POST /venues/create
    pub async fn create_venue(&self, form: &[(&str, &str)]) -> Response {
        self.post_form("/venues/create", form).await
    }

    /// GET /venues/{id}/edit
    pub async fn get_venue_edit_form(&self, id: impl Display) -> Response {
        self.get_path(&format!("/venues/{}/edit", id)).await
    }

    /// POST /venues/{id}/edit
    pub async fn edit_venue(&self, id: impl Display, form: &[(&str, &str)]) -> Response {
        self.post_form(&format!("/venues/{}/edit", id), form).await
    }

    /// DELETE /venues/{id}
    pub async fn delete_venue(&self, id: impl Display) -> Response {
        self.delete_path(&format!("/venues/{}", id)).await
    }

    /// POST /venues/{id}/delete, as sent by the button on the detail page
    pub async fn delete_venue_via_form(&self, id: impl Display) -> Response {
        self.post_form(&format!("/venues/{}/delete", id), &[]).await
    }

    // ========================================================================
    // Artists
    // ========================================================================

    /// GET /artists
    pub async fn get_artists(&self) -> Response {
        self.get_path("/artists").await
    }

    /// GET /artists/{id}
    pub async fn get_artist(&self, id: impl Display) -> Response {
        self.get_path(&format!("/artists/{}", id)).await
    }

    /// POST /artists/search
    pub async fn search_artists(&self, term: &str) -> Response {
        self.post_form("/artists/search", &[("search_term", term)])
            .await
    }

    /// POST /artists/create
    pub async fn create_artist(&self, form: &[(&str, &str)]) -> Response {
        self.post_form("/artists/create", form).await
    }

    /// GET /artists/{id}/edit
    pub async fn get_artist_edit_form(&self, id: impl Display) -> Response {
        self.get_path(&format!("/artists/{}/edit", id)).await
    }

    /// POST /artists/{id}/edit
    pub async fn edit_artist(&self, id: impl Display, form: &[(&str, &str)]) -> Response {
        self.post_form(&format!("/artists/{}/edit", id), form).await
    }

    /// DELETE /artists/{id}
    pub async fn delete_artist(&self, id: impl Display) -> Response {
        self.delete_path(&format!("/artists/{}", id)).await
    }

    /// POST /artists/{id}/delete
    pub async fn delete_artist_via_form(&self, id: impl Display) -> Response {
        self.post_form(&format!("/artists/{}/delete", id), &[]).await
    }

    // ========================================================================
    // Shows
    // ========================================================================

    /// GET /shows
    pub async fn get_shows(&self) -> Response {
        self.get_path("/shows").await
    }

    /// GET /shows/create
    pub async fn get_show_form(&self) -> Response {
        self.get_path("/shows/create").await
    }

    /// POST /shows/create
    pub async fn create_show(&self, artist_id: &str, venue_id: &str, start_time: &str) -> Response {
        self.post_form(
            "/shows/create",
            &[
                ("artist_id", artist_id),
                ("venue_id", venue_id),
                ("start_time", start_time),
            ],
        )
        .await
    }
}
