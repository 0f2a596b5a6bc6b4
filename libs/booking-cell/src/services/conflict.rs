use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, BookingError};

/// Fast-path duplicate-slot check. The unique index on
/// (parlour, date, time) remains the authoritative guard; this only buys
/// the friendlier error before the insert is attempted.
pub struct SlotConflictService {
    store: Arc<SupabaseClient>,
}

impl SlotConflictService {
    pub fn new(store: Arc<SupabaseClient>) -> Self {
        Self { store }
    }

    pub async fn slot_taken(
        &self,
        parlour: &str,
        date: &str,
        time: &str,
    ) -> Result<bool, BookingError> {
        debug!("Checking slot {} {} at {}", date, time, parlour);

        let path = format!(
            "/rest/v1/appointments?parlour=eq.{}&date=eq.{}&time=eq.{}",
            urlencoding::encode(parlour),
            urlencoding::encode(date),
            urlencoding::encode(time),
        );

        let existing: Vec<Appointment> = self
            .store
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| BookingError::Store(e.to_string()))?;

        Ok(!existing.is_empty())
    }
}
