mod api;
mod telemetry;

use axum::Router;
use copysmith_core::ai::AiConfig;
use copysmith_core::Generator;
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
pub type AppState = Arc<Generator>;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .expect("Failed to serialize OpenAPI spec");
        println!("{}", spec);
        return;
    }

    telemetry::init_telemetry();

    let config = AiConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!(
            "OPENROUTER_KEY not set; /api/generate will fail, /api/generate/fallback still works"
        );
    }
    tracing::info!(model = %config.model, base_url = %config.base_url, "AI configured");

    let state: AppState = Arc::new(Generator::from_config(config));

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .merge(api::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(telemetry::request_span)
                .on_request(())
                .on_response(telemetry::log_response)
                .on_failure(telemetry::log_failure),
        );

    let bind_addr = env::var("COPYSMITH_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", bind_addr, e));

    let local_addr = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or(bind_addr);
    tracing::info!("Server listening on {}", local_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", local_addr);

    axum::serve(listener, app).await.expect("Server error");
}
