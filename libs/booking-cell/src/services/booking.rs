use std::sync::Arc;

use chrono::Local;
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::{SupabaseClient, SupabaseError};

use crate::models::{
    slot_datetime, Appointment, BookAppointmentRequest, BookingError, NewAppointment,
};
use crate::services::conflict::SlotConflictService;

pub struct BookingService {
    store: Arc<SupabaseClient>,
    conflict_service: SlotConflictService,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(SupabaseClient::new(config));
        let conflict_service = SlotConflictService::new(Arc::clone(&store));

        Self {
            store,
            conflict_service,
        }
    }

    pub async fn book(&self, request: BookAppointmentRequest) -> Result<(), BookingError> {
        let appointment = validate_request(request)?;

        debug!(
            "Booking {} {} at {}",
            appointment.date, appointment.time, appointment.parlour
        );

        let Some(slot) = slot_datetime(&appointment.date, &appointment.time) else {
            return Err(BookingError::Validation(
                "Date must be YYYY-MM-DD and time must be HH:MM.".to_string(),
            ));
        };

        // Slots are wall-clock local times; the booking moment must be
        // strictly before the slot.
        if slot <= Local::now().naive_local() {
            return Err(BookingError::PastTime);
        }

        if self
            .conflict_service
            .slot_taken(&appointment.parlour, &appointment.date, &appointment.time)
            .await?
        {
            return Err(BookingError::SlotTaken);
        }

        let row = json!({
            "name": appointment.name,
            "email": appointment.email,
            "services": appointment.services,
            "parlour": appointment.parlour,
            "date": appointment.date,
            "time": appointment.time,
        });

        match self.store.insert::<Vec<Appointment>>("appointments", row).await {
            Ok(_) => {}
            // Lost the race after the pre-check; the unique index decides.
            Err(SupabaseError::Conflict(_)) => {
                warn!(
                    "Slot {} {} at {} was taken concurrently",
                    appointment.date, appointment.time, appointment.parlour
                );
                return Err(BookingError::SlotTaken);
            }
            Err(e) => return Err(BookingError::Store(e.to_string())),
        }

        info!(
            "Booked {} {} at {}",
            appointment.date, appointment.time, appointment.parlour
        );
        Ok(())
    }

    /// Every appointment, date then time ascending — chronological for the
    /// fixed formats.
    pub async fn list_all(&self) -> Result<Vec<Appointment>, BookingError> {
        let path = "/rest/v1/appointments?select=*&order=date.asc,time.asc";

        self.store
            .request(Method::GET, path, None)
            .await
            .map_err(|e| BookingError::Store(e.to_string()))
    }
}

fn validate_request(request: BookAppointmentRequest) -> Result<NewAppointment, BookingError> {
    // services is deliberately permissive: an empty list is a valid
    // booking, only a missing/null field rejects.
    let (Some(name), Some(email), Some(parlour), Some(date), Some(time), Some(services)) = (
        present(request.name),
        present(request.email),
        present(request.parlour),
        present(request.date),
        present(request.time),
        request.services,
    ) else {
        return Err(BookingError::Validation(
            "All fields are required.".to_string(),
        ));
    };

    Ok(NewAppointment {
        name,
        email,
        services,
        parlour,
        date,
        time,
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
