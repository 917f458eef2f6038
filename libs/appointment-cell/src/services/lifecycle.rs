// libs/appointment-cell/src/services/lifecycle.rs
use std::sync::Arc;

use tracing::{debug, info, warn};

use shared_database::{AppState, ClinicRepository};
use shared_models::{AppError, Appointment};

use crate::models::{AppointmentError, AppointmentStatus, UpdateAppointmentStatusRequest};

/// Status changes for stored appointments.
///
/// By default any non-empty status overwrites the current one. With strict
/// transitions enabled, moves are checked against [`Self::get_valid_transitions`].
pub struct AppointmentLifecycleService {
    repository: Arc<dyn ClinicRepository>,
    strict: bool,
}

impl AppointmentLifecycleService {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: Arc::clone(&state.repository),
            strict: state.config.strict_status_transitions,
        }
    }

    pub async fn update_status(
        &self,
        appointment_id: i64,
        request: UpdateAppointmentStatusRequest,
    ) -> Result<Appointment, AppError> {
        debug!("Updating status of appointment {}: {:?}", appointment_id, request.status);

        if self.strict {
            if let Some(new_status) = request.status.as_deref() {
                let current = self.repository.get_appointment(appointment_id).await?;
                let target = self.validate_status_transition(&current.status, new_status)?;

                let appointment = self
                    .repository
                    .replace_appointment_status(appointment_id, current.status, target.to_string())
                    .await?;
                return Ok(appointment);
            }
        }

        let appointment = self
            .repository
            .update_appointment_status(appointment_id, request.status)
            .await?;

        Ok(appointment)
    }

    /// Validate that a status transition is allowed and return the target
    /// in its canonical form.
    ///
    /// An unrecognized current status (older free-form data) may move to any
    /// known status; the target must always be known.
    pub fn validate_status_transition(
        &self,
        current_status: &str,
        new_status: &str,
    ) -> Result<AppointmentStatus, AppointmentError> {
        let target: AppointmentStatus = new_status.parse()?;

        let current = match current_status.parse::<AppointmentStatus>() {
            Ok(current) => current,
            Err(_) => {
                debug!("Current status '{}' is not recognized, allowing move to {}", current_status, target);
                return Ok(target);
            }
        };

        if current == target {
            return Ok(target);
        }

        if !self.get_valid_transitions(&current).contains(&target) {
            warn!("Invalid status transition attempted: {} -> {}", current, target);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current,
                to: target,
            });
        }

        info!("Status transition validated: {} -> {}", current, target);
        Ok(target)
    }

    /// Get all valid next statuses for a given current status
    pub fn get_valid_transitions(&self, current_status: &AppointmentStatus) -> Vec<AppointmentStatus> {
        if current_status.is_terminal() {
            return vec![];
        }

        match current_status {
            AppointmentStatus::Pending => vec![
                AppointmentStatus::Reminded,
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Reminded => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => vec![],
        }
    }
}
