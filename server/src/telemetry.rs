//! Logging setup and per-request trace hooks.
//!
//! Console output is always on. Traces and logs are also shipped over OTLP
//! when `OTEL_EXPORTER_OTLP_ENDPOINT` names a collector that answers.

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tracing::{Level, Span};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_SERVICE_NAME: &str = "copysmith-server";

/// Routes hit by health checks; they get trace-level spans and no logs.
const QUIET_PATHS: &[&str] = &[crate::api::testing::unauthed_ping::PATH];

const COLLECTOR_PROBE_TIMEOUT: Duration = Duration::from_millis(100);

/// Whether something accepts TCP connections at `endpoint`'s host and port.
fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/');

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, COLLECTOR_PROBE_TIMEOUT).is_ok())
        .unwrap_or(false)
}

fn init_console_only() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_with_collector(endpoint: &str, service_name: &str) {
    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .expect("Failed to create OTLP span exporter");
    let tracer_provider = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    let tracer = tracer_provider.tracer(DEFAULT_SERVICE_NAME);
    opentelemetry::global::set_tracer_provider(tracer_provider);

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .expect("Failed to create OTLP log exporter");
    let logger_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(OpenTelemetryTracingBridge::new(&logger_provider))
        .init();
}

/// Install the global tracing subscriber. Call once, before serving.
pub fn init_telemetry() {
    let Ok(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        init_console_only();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, logging to console");
        return;
    };

    if !collector_reachable(&endpoint) {
        init_console_only();
        tracing::info!(endpoint = %endpoint, "OTLP collector unreachable, logging to console");
        return;
    }

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
    init_with_collector(&endpoint, &service_name);
    tracing::info!(
        endpoint = %endpoint,
        service = %service_name,
        "Exporting traces and logs over OTLP"
    );
}

fn route_of(request: &Request<Body>) -> &str {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or(request.uri().path())
}

/// Span for one HTTP request, tagged with the matched route.
pub fn request_span(request: &Request<Body>) -> Span {
    let route = route_of(request);
    if QUIET_PATHS.contains(&route) {
        return tracing::trace_span!("http_request");
    }
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        route = %route,
    )
}

/// Log the outcome of a request. Upstream model failures (502) and other
/// server errors go out at error level, client mistakes at warn.
pub fn log_response(response: &Response<Body>, latency: Duration, span: &Span) {
    if span.metadata().map(|m| *m.level()) == Some(Level::TRACE) {
        return;
    }
    let status = response.status();
    let latency_ms = latency.as_millis() as u64;
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), latency_ms, "request failed");
    } else if status.is_client_error() {
        tracing::warn!(status = status.as_u16(), latency_ms, "request rejected");
    } else {
        tracing::info!(status = status.as_u16(), latency_ms, "request completed");
    }
}

pub fn log_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    tracing::error!(
        failure = %failure,
        latency_ms = latency.as_millis() as u64,
        "request errored before a response"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_port_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(!collector_reachable(&format!("http://{}", addr)));
    }

    #[test]
    fn test_open_port_is_reachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(collector_reachable(&format!("http://{}/", addr)));
    }

    #[test]
    fn test_garbage_endpoint_is_unreachable() {
        assert!(!collector_reachable("not a host"));
    }

    #[test]
    fn test_route_falls_back_to_uri_path() {
        let request = Request::builder()
            .uri("/api/generate?x=1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(route_of(&request), "/api/generate");
    }
}
