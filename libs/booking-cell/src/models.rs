use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stored appointment row. `date` and `time` stay strings on purpose:
/// lexicographic order on the fixed `YYYY-MM-DD` / `HH:MM` formats is
/// chronological order, so the store can sort them directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub services: Vec<String>,
    pub parlour: String,
    pub date: String,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

// Optional fields so absent JSON keys surface as the friendly validation
// failure instead of a deserialize rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub services: Option<Vec<String>>,
    pub parlour: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// A booking request that passed field validation.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub name: String,
    pub email: String,
    pub services: Vec<String>,
    pub parlour: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("Cannot book for a past time.")]
    PastTime,

    #[error("This slot is already booked at this parlour.")]
    SlotTaken,

    #[error("Booking store error: {0}")]
    Store(String),
}

/// Compose the slot's wall-clock timestamp. `None` for anything that is
/// not `YYYY-MM-DD` / `HH:MM`.
pub fn slot_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Some(date.and_time(time))
}
