// Handler behaviour against a mocked repository: storage failures and the
// calls each route is allowed to make.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use mockall::mock;
use mockall::predicate::eq;
use serde_json::json;
use tower::ServiceExt;

use appointment_cell::router::appointment_routes;
use shared_config::AppConfig;
use shared_database::{AppState, ClinicRepository, RepoError, RepoResult};
use shared_models::{Appointment, AppointmentWithPatient, NewAppointment, NewPatient, Patient};
use shared_utils::test_utils::{response_json, SamplePayloads, TestRequest};

mock! {
    pub Repository {}

    #[async_trait]
    impl ClinicRepository for Repository {
        async fn create_patient(&self, patient: NewPatient) -> RepoResult<Patient>;
        async fn list_patients(&self) -> RepoResult<Vec<Patient>>;
        async fn create_appointment(&self, appointment: NewAppointment) -> RepoResult<Appointment>;
        async fn list_appointments(&self) -> RepoResult<Vec<AppointmentWithPatient>>;
        async fn get_appointment(&self, id: i64) -> RepoResult<Appointment>;
        async fn update_appointment_status(
            &self,
            id: i64,
            status: Option<String>,
        ) -> RepoResult<Appointment>;
        async fn replace_appointment_status(
            &self,
            id: i64,
            expected: String,
            status: String,
        ) -> RepoResult<Appointment>;
        async fn reset_and_seed(&self, now: DateTime<Utc>) -> RepoResult<Vec<Patient>>;
    }
}

fn state_with(repository: MockRepository, strict: bool) -> Arc<AppState> {
    let config = AppConfig {
        strict_status_transitions: strict,
        ..AppConfig::default()
    };
    Arc::new(AppState::new(config, Arc::new(repository)))
}

fn stored_appointment(status: &str) -> Appointment {
    Appointment {
        id: 11,
        patient_id: 3,
        appointment_date: Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap(),
        status: status.to_string(),
    }
}

#[tokio::test]
async fn test_storage_failure_on_listing_is_server_error() {
    let mut repository = MockRepository::new();
    repository
        .expect_list_appointments()
        .times(1)
        .returning(|| Err(RepoError::Internal("disk unavailable".into())));

    let response = appointment_routes(state_with(repository, false))
        .oneshot(TestRequest::get("/appointments"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "disk unavailable");
}

#[tokio::test]
async fn test_integrity_failure_on_listing_is_server_error() {
    let mut repository = MockRepository::new();
    repository.expect_list_appointments().returning(|| {
        Err(RepoError::Integrity(
            "Appointment 1 references missing patient 2".into(),
        ))
    });

    let response = appointment_routes(state_with(repository, false))
        .oneshot(TestRequest::get("/appointments"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_invalid_booking_never_reaches_storage() {
    let mut repository = MockRepository::new();
    repository.expect_create_appointment().never();

    let response = appointment_routes(state_with(repository, false))
        .oneshot(TestRequest::post_json(
            "/appointments",
            &SamplePayloads::appointment(3, "not-a-date", "pending"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_passes_normalized_date_to_storage() {
    let mut repository = MockRepository::new();
    repository
        .expect_create_appointment()
        .withf(|appointment| {
            appointment.appointment_date == Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap()
                && appointment.status == "pending"
        })
        .times(1)
        .returning(|appointment| Ok(appointment.into_appointment(11)));

    let response = appointment_routes(state_with(repository, false))
        .oneshot(TestRequest::post_json(
            "/appointments",
            &SamplePayloads::appointment(3, "2025-05-05T11:00:00+02:00", "pending"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["appointment_date"], "2025-05-05T09:00:00+00:00");
}

#[tokio::test]
async fn test_permissive_patch_skips_current_status_lookup() {
    let mut repository = MockRepository::new();
    repository.expect_get_appointment().never();
    repository
        .expect_update_appointment_status()
        .with(eq(11), eq(Some("pending".to_string())))
        .times(1)
        .returning(|_, _| Ok(stored_appointment("pending")));

    let response = appointment_routes(state_with(repository, false))
        .oneshot(TestRequest::patch_json("/appointments/11", &json!({"status": "pending"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_strict_patch_rejects_before_writing() {
    let mut repository = MockRepository::new();
    repository
        .expect_get_appointment()
        .with(eq(11))
        .times(1)
        .returning(|_| Ok(stored_appointment("cancelled")));
    repository.expect_update_appointment_status().never();
    repository.expect_replace_appointment_status().never();

    let response = appointment_routes(state_with(repository, true))
        .oneshot(TestRequest::patch_json("/appointments/11", &json!({"status": "confirmed"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_strict_patch_on_missing_appointment_is_not_found() {
    let mut repository = MockRepository::new();
    repository
        .expect_get_appointment()
        .returning(|id| Err(RepoError::NotFound(format!("Appointment {} not found", id))));
    repository.expect_update_appointment_status().never();
    repository.expect_replace_appointment_status().never();

    let response = appointment_routes(state_with(repository, true))
        .oneshot(TestRequest::patch_json("/appointments/77", &json!({"status": "confirmed"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_strict_patch_writes_canonical_status_against_current() {
    let mut repository = MockRepository::new();
    repository
        .expect_get_appointment()
        .with(eq(11))
        .returning(|_| Ok(stored_appointment("pending")));
    repository.expect_update_appointment_status().never();
    repository
        .expect_replace_appointment_status()
        .with(eq(11), eq("pending".to_string()), eq("cancelled".to_string()))
        .times(1)
        .returning(|_, _, status| {
            let mut appointment = stored_appointment("pending");
            appointment.status = status;
            Ok(appointment)
        });

    let response = appointment_routes(state_with(repository, true))
        .oneshot(TestRequest::patch_json("/appointments/11", &json!({"status": "Canceled"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["status"], "cancelled");
}

#[tokio::test]
async fn test_lost_status_race_is_conflict() {
    let mut repository = MockRepository::new();
    repository
        .expect_get_appointment()
        .returning(|_| Ok(stored_appointment("pending")));
    repository
        .expect_replace_appointment_status()
        .returning(|id, _, _| {
            Err(RepoError::Conflict(format!(
                "Appointment {} status changed to 'cancelled' before this update",
                id
            )))
        });

    let response = appointment_routes(state_with(repository, true))
        .oneshot(TestRequest::patch_json("/appointments/11", &json!({"status": "reminded"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
