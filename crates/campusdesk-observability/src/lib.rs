//! Campusdesk Observability Module
//!
//! Provides configurable observability features including:
//! - Tracing and distributed tracing via OpenTelemetry
//! - Metrics collection via Prometheus
//! - HTTP request/response logging
//!
//! This module can be enabled or disabled at compile time via the `observability` feature flag.
//! At runtime, observability can be further controlled via the `OBSERVABILITY_ENABLED` environment variable.
//!
//! Both builds expose the same functions, so callers never need `cfg` attributes of
//! their own.
//!
//! # Examples
//!
//! ```no_run
//! use campusdesk_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     // ... application code ...
//!     shutdown_tracer().await;
//!     Ok(())
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    MetricsHandle, init_metrics, metrics_app, metrics_middleware, track_decryption_failure,
    track_payment_recorded, track_record_created, track_record_deleted,
};

/// Reads `OBSERVABILITY_ENABLED` once. Anything but `false`/`0` keeps it on.
#[cfg(feature = "observability")]
pub fn is_observability_enabled() -> bool {
    use std::sync::OnceLock;

    static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();
    *OBSERVABILITY_ENABLED
        .get_or_init(|| parse_enabled(std::env::var("OBSERVABILITY_ENABLED").ok().as_deref()))
}

#[cfg_attr(not(feature = "observability"), allow(dead_code))]
fn parse_enabled(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim();
            !(v.eq_ignore_ascii_case("false") || v == "0")
        }
        None => true,
    }
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Never constructed; only keeps `init_metrics` and `metrics_app` typed.
    pub enum MetricsHandle {}

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Falls back to plain console logging.
    pub fn init_tracing() -> anyhow::Result<()> {
        super::init_basic_console_logging()
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> anyhow::Result<Option<MetricsHandle>> {
        Ok(None)
    }

    pub fn metrics_app(handle: MetricsHandle) -> Router {
        match handle {}
    }

    pub fn track_record_created(_entity: &'static str) {}
    pub fn track_record_deleted(_entity: &'static str) {}
    pub fn track_payment_recorded(_amount: f64) {}
    pub fn track_decryption_failure(_entity: &'static str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;

#[cfg(test)]
mod tests {
    use super::parse_enabled;

    #[test]
    fn test_parse_enabled() {
        assert!(parse_enabled(None));
        assert!(parse_enabled(Some("true")));
        assert!(parse_enabled(Some("1")));
        assert!(!parse_enabled(Some("false")));
        assert!(!parse_enabled(Some("FALSE")));
        assert!(!parse_enabled(Some("0")));
    }
}
