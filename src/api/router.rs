use axum::{
    http::{Method, StatusCode, Uri},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::roster;
use super::state::AppState;
use super::types::ApiError;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Users and teams
        .merge(roster::create_roster_router())
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {} not allowed for {}", method, uri.path()),
    )
}
