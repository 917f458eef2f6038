use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

/// A patient that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl NewPatient {
    /// Build a validated patient. A blank email is stored as no email.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: Option<String>,
    ) -> Result<Self, ValidationError> {
        let patient = Self {
            name: name.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
            email: email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        };
        patient.validate()?;
        Ok(patient)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty("name"));
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::empty("phone"));
        }
        Ok(())
    }

    pub fn into_patient(self, id: i64) -> Patient {
        Patient {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
        }
    }
}
