use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::any::Any;
use std::time::Duration;

use tracing::{error, info, warn};

use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::{CookieJar, Form};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir};

use super::extract::EntityId;
use super::flash::{push_flash, take_flash, Flash};
use super::forms::{ArtistForm, SearchForm, ShowForm, VenueForm};
use super::metrics::{metrics_handler, record_store_error, set_listing_counts};
use super::pages::{self, FormMode, HomeView, SearchKind};
use super::{log_requests, state::*, ServerConfig};
use crate::listing_store::{ArtistFields, ListingStore, ListingStoreError, VenueFields};
use crate::listings;

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// Start times are submitted as naive wall-clock values, so `now` must be
/// the server's wall clock too.
fn wall_clock<Tz: TimeZone>(now: DateTime<Tz>) -> NaiveDateTime {
    now.naive_local()
}

/// The reference instant for every past/upcoming decision of one request.
fn request_now() -> NaiveDateTime {
    wall_clock(Local::now())
}

/// Failures that end a request with one of the generic error pages.
enum PageError {
    NotFound,
    Store {
        operation: &'static str,
        error: ListingStoreError,
    },
}

impl PageError {
    fn store(operation: &'static str, error: ListingStoreError) -> Self {
        PageError::Store { operation, error }
    }
}

impl From<ListingStoreError> for PageError {
    fn from(error: ListingStoreError) -> Self {
        PageError::store("read", error)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
            }
            PageError::Store { operation, error } => {
                error!("{} failed: {}", operation, error);
                record_store_error(operation, error.kind_label());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(pages::server_error_page()),
                )
                    .into_response()
            }
        }
    }
}

type PageResult = std::result::Result<(CookieJar, Html<String>), PageError>;

fn failure_status(err: &ListingStoreError) -> StatusCode {
    match err {
        ListingStoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ListingStoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        ListingStoreError::ReferentialIntegrity(_) => StatusCode::CONFLICT,
        ListingStoreError::Persistence(_) | ListingStoreError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Logs a failed write and returns the status the response should carry.
fn report_failure(operation: &'static str, err: &ListingStoreError) -> StatusCode {
    match err {
        ListingStoreError::Validation(_)
        | ListingStoreError::NotFound { .. }
        | ListingStoreError::ReferentialIntegrity(_) => warn!("{} rejected: {}", operation, err),
        _ => error!("{} failed: {}", operation, err),
    }
    record_store_error(operation, err.kind_label());
    failure_status(err)
}

fn refresh_listing_metrics(store: &dyn ListingStore) {
    match store.counts() {
        Ok(counts) => set_listing_counts(&counts),
        Err(err) => warn!("Could not refresh listing metrics: {}", err),
    }
}

fn render_home(state: &ServerState, flash: Option<&Flash>) -> Result<String, ListingStoreError> {
    let view = HomeView {
        counts: state.listing_store.counts()?,
        hash: state.hash.clone(),
        uptime: format_uptime(state.start_time.elapsed()),
    };
    Ok(pages::home_page(&view, flash))
}

/// Outcome page of create and delete submissions. A failure to render it
/// is counted against the submitting operation.
fn home_with_flash(
    state: &ServerState,
    operation: &'static str,
    status: StatusCode,
    flash: Flash,
) -> Response {
    match render_home(state, Some(&flash)) {
        Ok(page) => (status, Html(page)).into_response(),
        Err(err) => PageError::store(operation, err).into_response(),
    }
}

async fn home(State(state): State<ServerState>, jar: CookieJar) -> PageResult {
    let (jar, flash) = take_flash(jar);
    let page = render_home(&state, flash.as_ref())?;
    Ok((jar, Html(page)))
}

async fn not_found() -> PageError {
    PageError::NotFound
}

async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        pages::STYLESHEET,
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Request handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(pages::server_error_page()),
    )
        .into_response()
}

// =============================================================================
// Venues
// =============================================================================

async fn venues(State(store): State<GuardedListingStore>, jar: CookieJar) -> PageResult {
    let (jar, flash) = take_flash(jar);
    let directory = listings::venue_directory(store.as_ref(), request_now())?;
    Ok((jar, Html(pages::venues_page(&directory, flash.as_ref()))))
}

async fn search_venues(
    State(store): State<GuardedListingStore>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let results = listings::search_venues(store.as_ref(), &form.search_term, request_now())?;
    Ok(Html(pages::search_results_page(
        SearchKind::Venues,
        &form.search_term,
        &results,
    )))
}

async fn show_venue(
    State(store): State<GuardedListingStore>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> PageResult {
    let detail =
        listings::venue_detail(store.as_ref(), id, request_now())?.ok_or(PageError::NotFound)?;
    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(pages::venue_detail_page(&detail, flash.as_ref()))))
}

async fn create_venue_form() -> Html<String> {
    Html(pages::venue_form_page(
        FormMode::Create,
        &VenueFields::default(),
    ))
}

async fn create_venue_submission(
    State(state): State<ServerState>,
    Form(form): Form<VenueForm>,
) -> Response {
    let fields = form.into_fields();
    match state.listing_store.create_venue(&fields) {
        Ok(venue) => {
            info!("Listed venue {} ({})", venue.id, venue.name);
            refresh_listing_metrics(state.listing_store.as_ref());
            home_with_flash(
                &state,
                "create_venue",
                StatusCode::OK,
                Flash::success(format!("Venue {} was successfully listed!", venue.name)),
            )
        }
        Err(err) => {
            let status = report_failure("create_venue", &err);
            home_with_flash(
                &state,
                "create_venue",
                status,
                Flash::error(format!(
                    "An error occurred. Venue {} could not be listed.",
                    fields.name.trim()
                )),
            )
        }
    }
}

async fn edit_venue_form(
    State(store): State<GuardedListingStore>,
    EntityId(id): EntityId,
) -> Result<Html<String>, PageError> {
    let venue = store.get_venue(id)?.ok_or(PageError::NotFound)?;
    Ok(Html(pages::venue_form_page(
        FormMode::Edit(id),
        &venue.to_fields(),
    )))
}

async fn edit_venue_submission(
    State(store): State<GuardedListingStore>,
    EntityId(id): EntityId,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> Response {
    let flash = match store.update_venue(id, &form.into_fields()) {
        Ok(venue) => {
            info!("Updated venue {} ({})", venue.id, venue.name);
            Flash::success("Venue was successfully updated!")
        }
        Err(ListingStoreError::NotFound { .. }) => return PageError::NotFound.into_response(),
        Err(err) => {
            report_failure("update_venue", &err);
            Flash::error("An error occurred. Venue could not be changed.")
        }
    };
    (
        push_flash(jar, &flash),
        Redirect::to(&format!("/venues/{}", id)),
    )
        .into_response()
}

async fn delete_venue(State(state): State<ServerState>, EntityId(id): EntityId) -> Response {
    match state.listing_store.delete_venue(id) {
        Ok(()) => {
            info!("Deleted venue {}", id);
            refresh_listing_metrics(state.listing_store.as_ref());
            home_with_flash(
                &state,
                "delete_venue",
                StatusCode::OK,
                Flash::success(format!("Venue {} was successfully deleted.", id)),
            )
        }
        Err(ListingStoreError::NotFound { .. }) => PageError::NotFound.into_response(),
        Err(err) => {
            let status = report_failure("delete_venue", &err);
            home_with_flash(
                &state,
                "delete_venue",
                status,
                Flash::error(format!(
                    "An error occurred. Venue {} could not be deleted.",
                    id
                )),
            )
        }
    }
}

// =============================================================================
// Artists
// =============================================================================

async fn artists(State(store): State<GuardedListingStore>, jar: CookieJar) -> PageResult {
    let (jar, flash) = take_flash(jar);
    let roster = listings::artist_roster(store.as_ref())?;
    Ok((jar, Html(pages::artists_page(&roster, flash.as_ref()))))
}

async fn search_artists(
    State(store): State<GuardedListingStore>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let results = listings::search_artists(store.as_ref(), &form.search_term, request_now())?;
    Ok(Html(pages::search_results_page(
        SearchKind::Artists,
        &form.search_term,
        &results,
    )))
}

async fn show_artist(
    State(store): State<GuardedListingStore>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> PageResult {
    let detail =
        listings::artist_detail(store.as_ref(), id, request_now())?.ok_or(PageError::NotFound)?;
    let (jar, flash) = take_flash(jar);
    Ok((jar, Html(pages::artist_detail_page(&detail, flash.as_ref()))))
}

async fn create_artist_form() -> Html<String> {
    Html(pages::artist_form_page(
        FormMode::Create,
        &ArtistFields::default(),
    ))
}

async fn create_artist_submission(
    State(state): State<ServerState>,
    Form(form): Form<ArtistForm>,
) -> Response {
    let fields = form.into_fields();
    match state.listing_store.create_artist(&fields) {
        Ok(artist) => {
            info!("Listed artist {} ({})", artist.id, artist.name);
            refresh_listing_metrics(state.listing_store.as_ref());
            home_with_flash(
                &state,
                "create_artist",
                StatusCode::OK,
                Flash::success(format!("Artist {} was successfully listed!", artist.name)),
            )
        }
        Err(err) => {
            let status = report_failure("create_artist", &err);
            home_with_flash(
                &state,
                "create_artist",
                status,
                Flash::error(format!(
                    "An error occurred. Artist {} could not be listed.",
                    fields.name.trim()
                )),
            )
        }
    }
}

async fn edit_artist_form(
    State(store): State<GuardedListingStore>,
    EntityId(id): EntityId,
) -> Result<Html<String>, PageError> {
    let artist = store.get_artist(id)?.ok_or(PageError::NotFound)?;
    Ok(Html(pages::artist_form_page(
        FormMode::Edit(id),
        &artist.to_fields(),
    )))
}

async fn edit_artist_submission(
    State(store): State<GuardedListingStore>,
    EntityId(id): EntityId,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> Response {
    let flash = match store.update_artist(id, &form.into_fields()) {
        Ok(artist) => {
            info!("Updated artist {} ({})", artist.id, artist.name);
            Flash::success("Artist was successfully updated!")
        }
        Err(ListingStoreError::NotFound { .. }) => return PageError::NotFound.into_response(),
        Err(err) => {
            report_failure("update_artist", &err);
            Flash::error("An error occurred. Artist could not be changed.")
        }
    };
    (
        push_flash(jar, &flash),
        Redirect::to(&format!("/artists/{}", id)),
    )
        .into_response()
}

async fn delete_artist(State(state): State<ServerState>, EntityId(id): EntityId) -> Response {
    match state.listing_store.delete_artist(id) {
        Ok(()) => {
            info!("Deleted artist {}", id);
            refresh_listing_metrics(state.listing_store.as_ref());
            home_with_flash(
                &state,
                "delete_artist",
                StatusCode::OK,
                Flash::success(format!("Artist {} was successfully deleted.", id)),
            )
        }
        Err(ListingStoreError::NotFound { .. }) => PageError::NotFound.into_response(),
        Err(err) => {
            let status = report_failure("delete_artist", &err);
            home_with_flash(
                &state,
                "delete_artist",
                status,
                Flash::error(format!(
                    "An error occurred. Artist {} could not be deleted.",
                    id
                )),
            )
        }
    }
}

// =============================================================================
// Shows
// =============================================================================

async fn shows(State(store): State<GuardedListingStore>, jar: CookieJar) -> PageResult {
    let (jar, flash) = take_flash(jar);
    let cards = listings::upcoming_shows(store.as_ref(), request_now())?;
    Ok((jar, Html(pages::shows_page(&cards, flash.as_ref()))))
}

async fn create_show_form(
    State(store): State<GuardedListingStore>,
) -> Result<Html<String>, PageError> {
    let venues = listings::venue_choices(store.as_ref())?;
    let artists = listings::artist_roster(store.as_ref())?;
    Ok(Html(pages::show_form_page(&venues, &artists, None)))
}

async fn create_show_submission(
    State(state): State<ServerState>,
    Form(form): Form<ShowForm>,
) -> Response {
    let result = form
        .to_new_show()
        .map_err(ListingStoreError::from)
        .and_then(|new_show| state.listing_store.create_show(&new_show));
    match result {
        Ok(show) => {
            info!(
                "Listed show {} (venue {}, artist {}, {})",
                show.id, show.venue_id, show.artist_id, show.start_time
            );
            refresh_listing_metrics(state.listing_store.as_ref());
            home_with_flash(
                &state,
                "create_show",
                StatusCode::OK,
                Flash::success("Show was successfully listed!"),
            )
        }
        Err(err) => {
            let status = report_failure("create_show", &err);
            home_with_flash(
                &state,
                "create_show",
                status,
                Flash::error("An error occurred. Show could not be listed."),
            )
        }
    }
}

pub fn make_app(config: ServerConfig, listing_store: GuardedListingStore) -> Result<Router> {
    let state = ServerState::new(config.clone(), listing_store);

    let static_routes: Router<ServerState> = match &config.static_dir_path {
        Some(static_dir) => Router::new().nest_service("/static", ServeDir::new(static_dir)),
        None => Router::new().route("/static/style.css", get(stylesheet)),
    };

    let mut app: Router = Router::new()
        .route("/", get(home))
        // Venues
        .route("/venues", get(venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/delete", post(delete_venue))
        .route(
            "/venues/{id}/edit",
            get(edit_venue_form).post(edit_venue_submission),
        )
        // Artists
        .route("/artists", get(artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/{id}", get(show_artist).delete(delete_artist))
        .route("/artists/{id}/delete", post(delete_artist))
        .route(
            "/artists/{id}/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
        // Shows
        .route("/shows", get(shows))
        .route(
            "/shows/create",
            get(create_show_form).post(create_show_submission),
        )
        .merge(static_routes)
        .fallback(not_found)
        .with_state(state.clone());

    app = app.layer(CatchPanicLayer::custom(handle_panic));
    app = app.layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

async fn run_metrics_server(port: u16) -> Result<()> {
    let app = Router::new().route("/metrics", get(metrics_handler));
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Metrics available at port {}!", port);
    Ok(axum::serve(listener, app).await?)
}

pub async fn run_server(config: ServerConfig, listing_store: GuardedListingStore) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;

    refresh_listing_metrics(listing_store.as_ref());
    let app = make_app(config, listing_store)?;

    if metrics_port != 0 {
        tokio::spawn(async move {
            if let Err(err) = run_metrics_server(metrics_port).await {
                error!("Metrics server stopped: {}", err);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Ready to serve at port {}!", port);

    Ok(axum::serve(listener, app).await?)
}
