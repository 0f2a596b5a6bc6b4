use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{Appointment, BookAppointmentRequest, BookingError};
use crate::services::booking::BookingService;

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = BookingService::new(&state);

    service.book(request).await.map_err(|e| match e {
        BookingError::Validation(msg) => AppError::Validation(msg),
        BookingError::PastTime => AppError::BadRequest("Cannot book for a past time.".to_string()),
        BookingError::SlotTaken => {
            AppError::BadRequest("This slot is already booked at this parlour.".to_string())
        }
        BookingError::Store(msg) => {
            error!("Appointment error: {}", msg);
            AppError::Internal("Error booking appointment.".to_string())
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Appointment booked successfully!" })),
    ))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let service = BookingService::new(&state);

    let appointments = service.list_all().await.map_err(|e| {
        error!("Fetch error: {}", e);
        AppError::Internal("Error fetching appointments.".to_string())
    })?;

    Ok(Json(appointments))
}
