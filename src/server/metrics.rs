use crate::listing_store::ListingCounts;
use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all gigboard metrics
const PREFIX: &str = "gigboard";

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Listing Metrics
    pub static ref LISTINGS_TOTAL: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_listings_total"), "Total listings by type"),
        &["type"]
    ).expect("Failed to create listings_total metric");

    // Error Metrics
    pub static ref STORE_ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_store_errors_total"), "Failed store operations by kind"),
        &["operation", "kind"]
    ).expect("Failed to create store_errors_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(LISTINGS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(STORE_ERRORS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

pub fn set_listing_counts(counts: &ListingCounts) {
    LISTINGS_TOTAL
        .with_label_values(&["venue"])
        .set(counts.venues as f64);
    LISTINGS_TOTAL
        .with_label_values(&["artist"])
        .set(counts.artists as f64);
    LISTINGS_TOTAL
        .with_label_values(&["show"])
        .set(counts.shows as f64);
}

/// Record an HTTP request. `path` is categorized to keep label cardinality low.
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let path = categorize_endpoint(path);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

pub fn record_store_error(operation: &str, kind: &str) {
    STORE_ERRORS_TOTAL
        .with_label_values(&[operation, kind])
        .inc();
}

/// Maps a request path onto its route pattern, e.g. `/venues/12/edit`
/// becomes `/venues/{id}/edit`.
pub fn categorize_endpoint(path: &str) -> &'static str {
    let path = path.split('?').next().unwrap_or(path);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let is_id = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    match segments.as_slice() {
        [""] => "/",
        ["venues"] => "/venues",
        ["venues", "search"] => "/venues/search",
        ["venues", "create"] => "/venues/create",
        ["venues", id] if is_id(id) => "/venues/{id}",
        ["venues", id, "edit"] if is_id(id) => "/venues/{id}/edit",
        ["venues", id, "delete"] if is_id(id) => "/venues/{id}/delete",
        ["artists"] => "/artists",
        ["artists", "search"] => "/artists/search",
        ["artists", "create"] => "/artists/create",
        ["artists", id] if is_id(id) => "/artists/{id}",
        ["artists", id, "edit"] if is_id(id) => "/artists/{id}/edit",
        ["artists", id, "delete"] if is_id(id) => "/artists/{id}/delete",
        ["shows"] => "/shows",
        ["shows", "create"] => "/shows/create",
        ["static", ..] => "/static",
        _ => "other",
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
