use serde::{Deserialize, Serialize};

use shared_models::{NewPatient, ValidationError};

/// Body of `POST /patients`. Fields are optional here so that a missing
/// field is reported as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl CreatePatientRequest {
    pub fn into_new_patient(self) -> Result<NewPatient, ValidationError> {
        let name = self.name.ok_or_else(|| ValidationError::missing("name"))?;
        let phone = self.phone.ok_or_else(|| ValidationError::missing("phone"))?;
        NewPatient::new(name, phone, self.email)
    }
}
