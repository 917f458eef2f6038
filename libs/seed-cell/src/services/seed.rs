use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use shared_database::{AppState, ClinicRepository};
use shared_models::{AppError, Patient};

pub struct SeedService {
    repository: Arc<dyn ClinicRepository>,
}

impl SeedService {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: Arc::clone(&state.repository),
        }
    }

    /// Runs as one transaction: on failure the previous data is left intact.
    pub async fn reset_and_seed(&self) -> Result<Vec<Patient>, AppError> {
        warn!("Resetting all patients and appointments to sample data");

        let patients = self.repository.reset_and_seed(Utc::now()).await?;

        info!("Sample data installed for {} patients", patients.len());
        Ok(patients)
    }
}
