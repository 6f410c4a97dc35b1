//! Prometheus metrics: HTTP traffic plus a few domain counters.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

use crate::is_observability_enabled;

pub type MetricsHandle = PrometheusHandle;

const REQUEST_DURATION: &str = "http_request_duration_seconds";
const REQUESTS_ACTIVE: &str = "http_requests_active";
const PAYMENT_AMOUNT: &str = "payment_amount";

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];
const PAYMENT_BUCKETS: &[f64] = &[10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0];
const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Installs the global recorder and starts its upkeep task. `None` when
/// observability is switched off.
pub fn init_metrics() -> anyhow::Result<Option<MetricsHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(REQUEST_DURATION.into()), LATENCY_BUCKETS)?
        .set_buckets_for_metric(Matcher::Full(PAYMENT_AMOUNT.into()), PAYMENT_BUCKETS)?
        .install_recorder()?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            ticker.tick().await;
            upkeep.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Holds the in-flight gauge up until dropped, so a cancelled request still
/// releases it.
struct InFlight;

impl InFlight {
    fn enter() -> Self {
        gauge!(REQUESTS_ACTIVE).increment(1.0);
        InFlight
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        gauge!(REQUESTS_ACTIVE).decrement(1.0);
    }
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());

    let started = Instant::now();
    let response = {
        let _in_flight = InFlight::enter();
        next.run(req).await
    };
    let elapsed = started.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    counter!("http_requests_total", "method" => method.clone(), "path" => route.clone(), "status" => status)
        .increment(1);
    histogram!(REQUEST_DURATION, "method" => method, "path" => route).record(elapsed);

    response
}

/// Router served on the separate metrics port.
pub fn metrics_app(handle: MetricsHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_record_created(entity: &'static str) {
    if is_observability_enabled() {
        counter!("records_created_total", "entity" => entity).increment(1);
    }
}

pub fn track_record_deleted(entity: &'static str) {
    if is_observability_enabled() {
        counter!("records_deleted_total", "entity" => entity).increment(1);
    }
}

pub fn track_payment_recorded(amount: f64) {
    if is_observability_enabled() {
        counter!("payments_recorded_total").increment(1);
        histogram!(PAYMENT_AMOUNT).record(amount);
    }
}

/// A sealed column that could not be opened, usually after a key change.
pub fn track_decryption_failure(entity: &'static str) {
    if is_observability_enabled() {
        counter!("field_decryption_failures_total", "entity" => entity).increment(1);
    }
}
