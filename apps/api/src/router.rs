use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use appointment_cell::router::appointment_routes;
use patient_cell::router::patient_routes;
use seed_cell::router::seed_routes;
use shared_config::AppConfig;
use shared_database::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "MediRemind API is running!" }))
        .merge(patient_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(seed_routes(state))
}

/// Cross-origin policy for the web client.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = match HeaderValue::from_str(&config.cors_allowed_origin) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(_) => {
            warn!(
                "CORS_ALLOWED_ORIGIN '{}' is not a valid header value, allowing any origin",
                config.cors_allowed_origin
            );
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
