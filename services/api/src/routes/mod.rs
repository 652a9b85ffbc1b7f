//! API service routes

use axum::{Json, Router, middleware, response::IntoResponse, routing::get};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

pub mod comments;
pub mod playlists;
pub mod tweets;
pub mod videos;

/// Create the router for the API service
///
/// Every entity route requires an authenticated principal; only the
/// health check is open.
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .nest("/videos", videos::router())
        .nest("/comments", comments::router())
        .nest("/tweets", tweets::router())
        .nest("/playlists", playlists::router())
        .route_layer(middleware::from_fn(auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}
