use std::sync::Arc;

use axum::{extract::State, Json};

use shared_database::AppState;
use shared_models::AppError;

use crate::models::SeedResponse;
use crate::services::SeedService;

/// Wipe all patients and appointments and install the sample roster.
#[axum::debug_handler]
pub async fn seed_sample_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SeedResponse>, AppError> {
    let service = SeedService::new(&state);

    service.reset_and_seed().await?;

    Ok(Json(SeedResponse::success()))
}
