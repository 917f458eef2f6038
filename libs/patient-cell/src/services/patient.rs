use std::sync::Arc;

use tracing::debug;

use shared_database::{AppState, ClinicRepository};
use shared_models::{AppError, Patient};

use crate::models::CreatePatientRequest;

pub struct PatientService {
    repository: Arc<dyn ClinicRepository>,
}

impl PatientService {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: Arc::clone(&state.repository),
        }
    }

    pub async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, AppError> {
        debug!("Creating patient: {:?}", request.name);

        let new_patient = request.into_new_patient()?;
        let patient = self.repository.create_patient(new_patient).await?;

        debug!("Patient created successfully with ID: {}", patient.id);
        Ok(patient)
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, AppError> {
        debug!("Listing patients");
        Ok(self.repository.list_patients().await?)
    }
}
