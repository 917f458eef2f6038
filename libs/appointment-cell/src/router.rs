// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};

use shared_database::AppState;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::book_appointment),
        )
        .route("/appointments/{appointment_id}", patch(handlers::update_appointment_status))
        // Legacy booking path still called by older web clients
        .route("/schedule_appointment", post(handlers::book_appointment))
        .with_state(state)
}
