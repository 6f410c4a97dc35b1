//! Request logging and the tracing subscriber used by the API server.

use axum::{
    extract::{MatchedPath, Request},
    http::Method,
    middleware::Next,
    response::Response,
};
use opentelemetry::{KeyValue, global, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    runtime,
    trace::{Config, RandomIdGenerator, Sampler, Tracer},
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{init_basic_console_logging, is_observability_enabled};

const LOG_DIR: &str = "storage/logs";
const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}

/// Fields shared by the start and finish lines of one request.
struct RequestLine {
    id: String,
    method: Method,
    route: String,
}

impl RequestLine {
    fn new(req: &Request) -> Self {
        let route = match req.extensions().get::<MatchedPath>() {
            Some(matched) => matched.as_str().to_owned(),
            None => req.uri().path().to_owned(),
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            method: req.method().clone(),
            route,
        }
    }

    fn finished(&self, status: u16, started: Instant) {
        let latency_ms = started.elapsed().as_millis() as u64;
        let (id, method, route) = (&self.id, &self.method, &self.route);
        if status >= 500 {
            error!(request_id = %id, %method, path = %route, status, latency_ms, "Server error");
        } else if status >= 400 {
            warn!(request_id = %id, %method, path = %route, status, latency_ms, "Client error");
        } else {
            info!(request_id = %id, %method, path = %route, status, latency_ms, "Request completed");
        }
    }
}

/// Logs each request on arrival and again with its status and latency.
/// 5xx responses log at error level, 4xx at warn.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let started = Instant::now();
    let line = RequestLine::new(&req);
    info!(request_id = %line.id, method = %line.method, path = %line.route, "Incoming request");

    let response = next.run(req).await;
    line.finished(response.status().as_u16(), started);
    response
}

fn otlp_tracer() -> Result<Tracer, TraceError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::new([
        KeyValue::new(SERVICE_NAME, "campusdesk"),
        KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
        KeyValue::new("environment", env_or("ENVIRONMENT", "development")),
    ]);
    let trace_config = Config::default()
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(env_or("OTEL_EXPORTER_OTLP_ENDPOINT", DEFAULT_OTLP_ENDPOINT)),
        )
        .with_trace_config(trace_config)
        .install_batch(runtime::Tokio)
}

/// `RUST_LOG` wins; otherwise `LOG_LEVEL` applies to the campusdesk crates.
fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = env_or("LOG_LEVEL", "info");
        EnvFilter::new(format!(
            "campusdesk={level},campusdesk_core={level},campusdesk_crypto={level},\
             tower_http=warn,hyper=info,tonic=info,sqlx=warn"
        ))
    })
}

/// Installs the global subscriber.
///
/// Console output is always present. With observability on, two daily files
/// are added under `storage/logs` (errors as text, everything from info up
/// as JSON) plus OpenTelemetry spans when the exporter can be built.
pub fn init_tracing() -> anyhow::Result<()> {
    if !is_observability_enabled() {
        return init_basic_console_logging();
    }
    std::fs::create_dir_all(LOG_DIR)?;

    let console = fmt::layer()
        .compact()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_filter());

    let errors = fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "campusdesk.log"))
        .with_ansi(false)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(EnvFilter::new("error"));

    let structured = fmt::layer()
        .json()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "campusdesk.json"))
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(console)
        .with(errors)
        .with(structured);

    match otlp_tracer() {
        Ok(tracer) => {
            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init()?;
            info!("Tracing initialized with OpenTelemetry and file logging");
        }
        Err(e) => {
            registry.try_init()?;
            warn!(error = %e, "OpenTelemetry unavailable, logging to console and files only");
        }
    }
    Ok(())
}

/// Flushes pending spans before exit.
pub async fn shutdown_tracer() {
    if is_observability_enabled() {
        info!("Shutting down OpenTelemetry tracer");
        global::shutdown_tracer_provider();
    }
}
