use std::sync::Arc;

use axum::{routing::get, Router};

use auth_cell::router::auth_routes;
use booking_cell::router::booking_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Blush Beauty API is running!" }))
        .nest("/api", auth_routes(state.clone()).merge(booking_routes(state)))
}
