//! Router assembly

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

/// Merge the feature routers and wrap them in the HTTP layers
pub fn build_router(auth_routes: Router, task_routes: Router, frontend_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(auth_routes)
        .merge(task_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_origins))
}

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
