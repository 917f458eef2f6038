use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request},
    response::Response,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_database::AppState;

pub struct TestConfig {
    pub database_url: String,
    pub strict_status_transitions: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            database_url: ":memory:".to_string(),
            strict_status_transitions: false,
        }
    }
}

impl TestConfig {
    pub fn strict() -> Self {
        Self {
            strict_status_transitions: true,
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database_url.clone(),
            strict_status_transitions: self.strict_status_transitions,
            ..AppConfig::default()
        }
    }

    /// Fresh state over its own database.
    pub fn to_state(&self) -> Arc<AppState> {
        let state = AppState::from_config(self.to_app_config())
            .expect("test database should open");
        Arc::new(state)
    }
}

pub struct TestRequest;

impl TestRequest {
    pub fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    pub fn post_empty(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    pub fn json(method: Method, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }

    pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Self::json(Method::POST, uri, body)
    }

    pub fn patch_json(uri: &str, body: &Value) -> Request<Body> {
        Self::json(Method::PATCH, uri, body)
    }
}

pub async fn response_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&body).expect("JSON body")
}

pub struct SamplePayloads;

impl SamplePayloads {
    pub fn patient(name: &str) -> Value {
        json!({
            "name": name,
            "phone": "+1-555-0199",
            "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        })
    }

    pub fn appointment(patient_id: i64, date: &str, status: &str) -> Value {
        json!({
            "patient_id": patient_id,
            "appointment_date": date,
            "status": status,
        })
    }
}
