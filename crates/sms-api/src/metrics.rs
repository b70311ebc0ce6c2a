//! Prometheus metrics: request counter/histogram middleware and the exporter
//! backing the `/metrics` endpoint.

use std::sync::LazyLock;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

const DURATION_METRIC: &str = "http_request_duration_seconds";

/// Install the Prometheus recorder; the returned handle renders the scrape
/// payload for [`metrics_handler`].
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(DURATION_METRIC.to_string()),
            &[
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Record a counter and duration histogram per request.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        DURATION_METRIC,
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(started.elapsed().as_secs_f64());

    response
}

/// Replace UUID and numeric path segments with `:id` so every record of one
/// route shares a single label value.
fn normalize_path(path: &str) -> String {
    static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap()
    });
    static NUMBER_SEGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/\d+").unwrap());

    let normalized = UUID_SEGMENT.replace_all(path, ":id");
    NUMBER_SEGMENT.replace_all(&normalized, "/:id").into_owned()
}

pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Count login attempts and other credential events by outcome.
pub fn record_auth_event(event_type: &str, success: bool) {
    counter!(
        "auth_events_total",
        "type" => event_type.to_string(),
        "status" => if success { "success" } else { "failure" }
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_segments_collapse() {
        assert_eq!(
            normalize_path("/api/v1/students/550e8400-e29b-41d4-a716-446655440000"),
            "/api/v1/students/:id"
        );
        assert_eq!(
            normalize_path("/api/v1/fees/550e8400-e29b-41d4-a716-446655440000/payments"),
            "/api/v1/fees/:id/payments"
        );
    }

    #[test]
    fn test_static_paths_pass_through() {
        assert_eq!(normalize_path("/health"), "/health");
        assert_eq!(normalize_path("/api/v1/stats/fees"), "/api/v1/stats/fees");
    }
}
