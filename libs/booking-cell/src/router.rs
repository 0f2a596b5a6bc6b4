use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/appointment", post(handlers::book_appointment))
        .route("/appointments", get(handlers::list_appointments))
        .with_state(state)
}
