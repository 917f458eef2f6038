//! Storage layer for the scheduling API.

mod repository;
mod schema;
mod seed;
mod sqlite;
mod state;

pub use repository::{ClinicRepository, SqliteClinicRepository};
pub use schema::SCHEMA;
pub use seed::{seed_schedule, SeedPatient, SEED_PATIENTS};
pub use sqlite::Database;
pub use state::AppState;

use shared_models::{AppError, ValidationError};
use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage task failed: {0}")]
    Internal(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(e) => AppError::ValidationError(e.0),
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Integrity(msg) => AppError::Integrity(msg),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Sqlite(e) => AppError::Database(e.to_string()),
            RepoError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
