//! Router assembly.

pub mod api;
pub mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::config::Settings;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// The full application: `/api/*` resources, operational routes, and the HTTP middleware stack.
pub fn app(state: AppState, settings: &Settings) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .merge(common_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(settings.upload_limit_bytes))
        .layer(RequestBodyLimitLayer::new(settings.upload_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
