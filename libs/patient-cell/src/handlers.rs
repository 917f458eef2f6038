use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use shared_database::AppState;
use shared_models::{AppError, Patient};
use shared_utils::extractor::JsonBody;

use crate::models::CreatePatientRequest;
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    let service = PatientService::new(&state);

    let patient = service.create_patient(request).await?;

    Ok((StatusCode::CREATED, Json(patient)))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let service = PatientService::new(&state);

    let patients = service.list_patients().await?;

    Ok(Json(patients))
}
