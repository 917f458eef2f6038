// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared_database::AppState;
use shared_models::{AppError, Appointment, AppointmentWithPatient};
use shared_utils::extractor::JsonBody;

use crate::models::{CreateAppointmentRequest, UpdateAppointmentStatusRequest};
use crate::services::{AppointmentBookingService, AppointmentLifecycleService};

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AppointmentWithPatient>>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointments = booking_service.list_appointments().await?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service.book_appointment(request).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    Path(appointment_id): Path<i64>,
    JsonBody(request): JsonBody<UpdateAppointmentStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let lifecycle_service = AppointmentLifecycleService::new(&state);

    let appointment = lifecycle_service.update_status(appointment_id, request).await?;

    Ok(Json(appointment))
}
