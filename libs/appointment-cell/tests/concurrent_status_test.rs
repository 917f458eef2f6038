// Strict status changes racing on the same appointment.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use tokio::sync::Barrier;
use tower::ServiceExt;

use appointment_cell::router::appointment_routes;
use shared_config::AppConfig;
use shared_database::{
    AppState, ClinicRepository, Database, RepoResult, SqliteClinicRepository,
};
use shared_models::{Appointment, AppointmentWithPatient, NewAppointment, NewPatient, Patient};
use shared_utils::test_utils::{response_json, TestRequest};

/// SQLite repository whose reads wait until every racer has read, and whose
/// writes to `slow_status` are held back.
struct RacingRepository {
    inner: SqliteClinicRepository,
    readers: Barrier,
    slow_status: &'static str,
}

#[async_trait]
impl ClinicRepository for RacingRepository {
    async fn create_patient(&self, patient: NewPatient) -> RepoResult<Patient> {
        self.inner.create_patient(patient).await
    }

    async fn list_patients(&self) -> RepoResult<Vec<Patient>> {
        self.inner.list_patients().await
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> RepoResult<Appointment> {
        self.inner.create_appointment(appointment).await
    }

    async fn list_appointments(&self) -> RepoResult<Vec<AppointmentWithPatient>> {
        self.inner.list_appointments().await
    }

    async fn get_appointment(&self, id: i64) -> RepoResult<Appointment> {
        let appointment = self.inner.get_appointment(id).await?;
        self.readers.wait().await;
        Ok(appointment)
    }

    async fn update_appointment_status(
        &self,
        id: i64,
        status: Option<String>,
    ) -> RepoResult<Appointment> {
        self.inner.update_appointment_status(id, status).await
    }

    async fn replace_appointment_status(
        &self,
        id: i64,
        expected: String,
        status: String,
    ) -> RepoResult<Appointment> {
        if status == self.slow_status {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.inner.replace_appointment_status(id, expected, status).await
    }

    async fn reset_and_seed(&self, now: DateTime<Utc>) -> RepoResult<Vec<Patient>> {
        self.inner.reset_and_seed(now).await
    }
}

#[tokio::test]
async fn test_concurrent_strict_updates_cannot_reopen_cancelled_appointment() {
    let inner = SqliteClinicRepository::new(Database::open_in_memory().unwrap());
    let patient = inner
        .create_patient(NewPatient::new("Ada", "555-0100", None).unwrap())
        .await
        .unwrap();
    let appointment = inner
        .create_appointment(
            NewAppointment::new(
                patient.id,
                Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
                "pending",
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let repository = Arc::new(RacingRepository {
        inner,
        readers: Barrier::new(2),
        slow_status: "reminded",
    });
    let config = AppConfig {
        strict_status_transitions: true,
        ..AppConfig::default()
    };
    let state = Arc::new(AppState::new(config, repository.clone()));

    let uri = format!("/appointments/{}", appointment.id);
    let remind = appointment_routes(state.clone())
        .oneshot(TestRequest::patch_json(&uri, &json!({"status": "reminded"})));
    let cancel = appointment_routes(state.clone())
        .oneshot(TestRequest::patch_json(&uri, &json!({"status": "cancelled"})));

    let (remind, cancel) = tokio::join!(remind, cancel);
    let (remind, cancel) = (remind.unwrap(), cancel.unwrap());

    assert_eq!(cancel.status(), StatusCode::OK);
    assert_eq!(remind.status(), StatusCode::CONFLICT);
    let body = response_json(remind).await;
    assert!(body["error"].as_str().unwrap().contains("cancelled"));

    let stored = repository.inner.get_appointment(appointment.id).await.unwrap();
    assert_eq!(stored.status, "cancelled");
}
