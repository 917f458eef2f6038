use std::sync::Arc;

use axum::{routing::post, Router};

use shared_database::AppState;

use crate::handlers;

pub fn seed_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/seed", post(handlers::seed_sample_data))
        .with_state(state)
}
