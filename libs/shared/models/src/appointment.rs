use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::patient::Patient;

/// Status given to appointments created by the seed roster.
pub const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    #[serde(with = "crate::datetime::iso8601")]
    pub appointment_date: DateTime<Utc>,
    pub status: String,
}

/// An appointment joined to the patient it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentWithPatient {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub patient: Patient,
}

/// An appointment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub appointment_date: DateTime<Utc>,
    pub status: String,
}

impl NewAppointment {
    pub fn new(
        patient_id: i64,
        appointment_date: DateTime<Utc>,
        status: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let appointment = Self {
            patient_id,
            appointment_date,
            status: status.into().trim().to_string(),
        };
        appointment.validate()?;
        Ok(appointment)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_status(&self.status)
    }

    pub fn into_appointment(self, id: i64) -> Appointment {
        Appointment {
            id,
            patient_id: self.patient_id,
            appointment_date: self.appointment_date,
            status: self.status,
        }
    }
}

/// Statuses are free-form, but never empty.
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if status.trim().is_empty() {
        return Err(ValidationError::empty("status"));
    }
    Ok(())
}
