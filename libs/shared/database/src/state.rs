use std::sync::Arc;

use shared_config::AppConfig;

use crate::repository::{ClinicRepository, SqliteClinicRepository};
use crate::sqlite::Database;
use crate::RepoResult;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub repository: Arc<dyn ClinicRepository>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: Arc<dyn ClinicRepository>) -> Self {
        Self { config, repository }
    }

    /// Open the configured database and wrap it in the SQLite repository.
    pub fn from_config(config: AppConfig) -> RepoResult<Self> {
        let db = Database::from_config(&config)?;
        let repository = Arc::new(SqliteClinicRepository::new(db));
        Ok(Self::new(config, repository))
    }
}
