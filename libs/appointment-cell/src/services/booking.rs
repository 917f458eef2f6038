// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::debug;

use shared_database::{AppState, ClinicRepository};
use shared_models::{AppError, Appointment, AppointmentWithPatient};

use crate::models::CreateAppointmentRequest;

pub struct AppointmentBookingService {
    repository: Arc<dyn ClinicRepository>,
}

impl AppointmentBookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: Arc::clone(&state.repository),
        }
    }

    /// Book an appointment for an existing patient.
    pub async fn book_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppError> {
        debug!("Booking appointment for patient {:?}", request.patient_id);

        let new_appointment = request.into_new_appointment()?;
        let appointment = self.repository.create_appointment(new_appointment).await?;

        debug!("Appointment booked successfully with ID: {}", appointment.id);
        Ok(appointment)
    }

    /// Every appointment with its patient.
    pub async fn list_appointments(&self) -> Result<Vec<AppointmentWithPatient>, AppError> {
        debug!("Listing appointments");
        Ok(self.repository.list_appointments().await?)
    }
}
