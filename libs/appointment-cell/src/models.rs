// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use shared_models::datetime::parse_timestamp;
use shared_models::{AppError, NewAppointment, ValidationError};

// ==============================================================================
// STATUS VOCABULARY
// ==============================================================================

/// Statuses the clinic workflow knows about. Stored statuses are plain
/// strings; this enum only matters when strict transitions are enabled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Reminded,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Reminded => write!(f, "reminded"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "reminded" => Ok(AppointmentStatus::Reminded),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            other => Err(AppointmentError::UnknownStatus(other.to_string())),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Body of `POST /appointments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: Option<i64>,
    pub appointment_date: Option<String>,
    pub status: Option<String>,
}

impl CreateAppointmentRequest {
    pub fn into_new_appointment(self) -> Result<NewAppointment, ValidationError> {
        let patient_id = self
            .patient_id
            .ok_or_else(|| ValidationError::missing("patient_id"))?;
        let raw_date = self
            .appointment_date
            .ok_or_else(|| ValidationError::missing("appointment_date"))?;
        let status = self.status.ok_or_else(|| ValidationError::missing("status"))?;

        let appointment_date = parse_timestamp(&raw_date)?;
        NewAppointment::new(patient_id, appointment_date, status)
    }
}

/// Body of `PATCH /appointments/{id}`. An absent or `null` status leaves
/// the appointment unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Unknown appointment status '{0}'")]
    UnknownStatus(String),

    #[error("Cannot change appointment status from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::UnknownStatus(_) => AppError::ValidationError(err.to_string()),
            AppointmentError::InvalidStatusTransition { .. } => AppError::Conflict(err.to_string()),
        }
    }
}
