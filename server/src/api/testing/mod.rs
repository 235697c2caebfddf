pub mod unauthed_ping;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/test endpoints
pub fn router() -> Router<AppState> {
    Router::new().route(unauthed_ping::PATH, get(unauthed_ping::unauthed_ping))
}

#[derive(OpenApi)]
#[openapi(
    paths(unauthed_ping::unauthed_ping),
    components(schemas(unauthed_ping::UnauthedPingResponse))
)]
pub struct ApiDoc;
