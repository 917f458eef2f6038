//! Repository contract and its SQLite implementation.
//!
//! Every write runs inside one transaction; a failed or abandoned call
//! leaves no partial state behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use shared_models::appointment::DEFAULT_STATUS;
use shared_models::{Appointment, AppointmentWithPatient, NewAppointment, NewPatient, Patient};

use crate::seed::{seed_schedule, SEED_PATIENTS};
use crate::sqlite::Database;
use crate::{RepoError, RepoResult};

const APPOINTMENT_SELECT_SQL: &str =
    "SELECT id, patient_id, appointment_date, status FROM appointments";

/// Storage operations behind the API handlers.
#[async_trait]
pub trait ClinicRepository: Send + Sync {
    async fn create_patient(&self, patient: NewPatient) -> RepoResult<Patient>;
    async fn list_patients(&self) -> RepoResult<Vec<Patient>>;
    /// Fails with `NotFound` when `patient_id` names no stored patient.
    async fn create_appointment(&self, appointment: NewAppointment) -> RepoResult<Appointment>;
    /// Fails with `Integrity` when an appointment points at a missing patient.
    async fn list_appointments(&self) -> RepoResult<Vec<AppointmentWithPatient>>;
    async fn get_appointment(&self, id: i64) -> RepoResult<Appointment>;
    /// `None` leaves the record untouched and returns it as stored.
    async fn update_appointment_status(
        &self,
        id: i64,
        status: Option<String>,
    ) -> RepoResult<Appointment>;
    /// Write `status` only while the stored status still equals `expected`.
    /// Fails with `Conflict` when another writer got there first.
    async fn replace_appointment_status(
        &self,
        id: i64,
        expected: String,
        status: String,
    ) -> RepoResult<Appointment>;
    /// Replace all data with the sample roster, scheduling relative to `now`.
    async fn reset_and_seed(&self, now: DateTime<Utc>) -> RepoResult<Vec<Patient>>;
}

/// SQLite-backed repository.
#[derive(Clone)]
pub struct SqliteClinicRepository {
    db: Database,
}

impl SqliteClinicRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClinicRepository for SqliteClinicRepository {
    async fn create_patient(&self, patient: NewPatient) -> RepoResult<Patient> {
        patient.validate()?;

        self.db
            .run(move |conn| {
                let tx = conn.transaction()?;
                let id = insert_patient(&tx, &patient)?;
                tx.commit()?;

                info!("Created patient {}", id);
                Ok(patient.into_patient(id))
            })
            .await
    }

    async fn list_patients(&self) -> RepoResult<Vec<Patient>> {
        self.db
            .run(|conn| {
                let mut stmt =
                    conn.prepare("SELECT id, name, phone, email FROM patients ORDER BY id")?;
                let patients = stmt
                    .query_map([], patient_from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(patients)
            })
            .await
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> RepoResult<Appointment> {
        appointment.validate()?;

        self.db
            .run(move |conn| {
                let tx = conn.transaction()?;

                if !patient_exists(&tx, appointment.patient_id)? {
                    warn!(
                        "Rejected appointment for unknown patient {}",
                        appointment.patient_id
                    );
                    return Err(RepoError::NotFound(format!(
                        "Patient {} not found",
                        appointment.patient_id
                    )));
                }

                let id = insert_appointment(&tx, &appointment)?;
                tx.commit()?;

                info!(
                    "Created appointment {} for patient {}",
                    id, appointment.patient_id
                );
                Ok(appointment.into_appointment(id))
            })
            .await
    }

    async fn list_appointments(&self) -> RepoResult<Vec<AppointmentWithPatient>> {
        self.db
            .run(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT a.id, a.patient_id, a.appointment_date, a.status,
                            p.id, p.name, p.phone, p.email
                     FROM appointments a
                     LEFT JOIN patients p ON p.id = a.patient_id
                     ORDER BY a.id",
                )?;

                let rows = stmt
                    .query_map([], |row| {
                        let appointment = appointment_from_row(row)?;
                        let patient = match row.get::<_, Option<i64>>(4)? {
                            Some(id) => Some(Patient {
                                id,
                                name: row.get(5)?,
                                phone: row.get(6)?,
                                email: row.get(7)?,
                            }),
                            None => None,
                        };
                        Ok((appointment, patient))
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                rows.into_iter()
                    .map(|(appointment, patient)| match patient {
                        Some(patient) => Ok(AppointmentWithPatient {
                            appointment,
                            patient,
                        }),
                        None => Err(RepoError::Integrity(format!(
                            "Appointment {} references missing patient {}",
                            appointment.id, appointment.patient_id
                        ))),
                    })
                    .collect()
            })
            .await
    }

    async fn get_appointment(&self, id: i64) -> RepoResult<Appointment> {
        self.db
            .run(move |conn| {
                fetch_appointment(conn, id)?
                    .ok_or_else(|| RepoError::NotFound(format!("Appointment {} not found", id)))
            })
            .await
    }

    async fn update_appointment_status(
        &self,
        id: i64,
        status: Option<String>,
    ) -> RepoResult<Appointment> {
        if let Some(status) = &status {
            shared_models::appointment::validate_status(status)?;
        }

        self.db
            .run(move |conn| {
                let tx = conn.transaction()?;

                let mut appointment = fetch_appointment(&tx, id)?
                    .ok_or_else(|| RepoError::NotFound(format!("Appointment {} not found", id)))?;

                let Some(status) = status else {
                    debug!("No status supplied for appointment {}, leaving it unchanged", id);
                    return Ok(appointment);
                };

                let status = status.trim().to_string();
                tx.execute(
                    "UPDATE appointments SET status = ?1 WHERE id = ?2",
                    params![status, id],
                )?;
                tx.commit()?;

                info!(
                    "Appointment {} status changed: {} -> {}",
                    id, appointment.status, status
                );
                appointment.status = status;
                Ok(appointment)
            })
            .await
    }

    async fn replace_appointment_status(
        &self,
        id: i64,
        expected: String,
        status: String,
    ) -> RepoResult<Appointment> {
        shared_models::appointment::validate_status(&status)?;

        self.db
            .run(move |conn| {
                let tx = conn.transaction()?;

                let changed = tx.execute(
                    "UPDATE appointments SET status = ?1 WHERE id = ?2 AND status = ?3",
                    params![status, id, expected],
                )?;

                let appointment = fetch_appointment(&tx, id)?
                    .ok_or_else(|| RepoError::NotFound(format!("Appointment {} not found", id)))?;

                if changed == 0 {
                    warn!(
                        "Appointment {} status is '{}', expected '{}'",
                        id, appointment.status, expected
                    );
                    return Err(RepoError::Conflict(format!(
                        "Appointment {} status changed to '{}' before this update",
                        id, appointment.status
                    )));
                }

                tx.commit()?;
                info!("Appointment {} status changed: {} -> {}", id, expected, status);
                Ok(appointment)
            })
            .await
    }

    async fn reset_and_seed(&self, now: DateTime<Utc>) -> RepoResult<Vec<Patient>> {
        self.db
            .run(move |conn| {
                let tx = conn.transaction()?;

                let removed_appointments = tx.execute("DELETE FROM appointments", [])?;
                let removed_patients = tx.execute("DELETE FROM patients", [])?;
                debug!(
                    "Seed reset removed {} appointments and {} patients",
                    removed_appointments, removed_patients
                );

                let mut patients = Vec::with_capacity(SEED_PATIENTS.len());
                for (index, seed) in SEED_PATIENTS.iter().enumerate() {
                    let new_patient = NewPatient::new(
                        seed.name,
                        seed.phone,
                        seed.email.map(str::to_string),
                    )?;
                    let patient_id = insert_patient(&tx, &new_patient)?;

                    for date in seed_schedule(index, now) {
                        let appointment = NewAppointment::new(patient_id, date, DEFAULT_STATUS)?;
                        insert_appointment(&tx, &appointment)?;
                    }

                    patients.push(new_patient.into_patient(patient_id));
                }

                tx.commit()?;
                info!(
                    "Seeded {} patients with {} appointments",
                    patients.len(),
                    patients.len() * 2
                );
                Ok(patients)
            })
            .await
    }
}

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
    })
}

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        appointment_date: row.get(2)?,
        status: row.get(3)?,
    })
}

fn insert_patient(conn: &Connection, patient: &NewPatient) -> RepoResult<i64> {
    conn.execute(
        "INSERT INTO patients (name, phone, email) VALUES (?1, ?2, ?3)",
        params![patient.name, patient.phone, patient.email],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_appointment(conn: &Connection, appointment: &NewAppointment) -> RepoResult<i64> {
    conn.execute(
        "INSERT INTO appointments (patient_id, appointment_date, status) VALUES (?1, ?2, ?3)",
        params![
            appointment.patient_id,
            appointment.appointment_date,
            appointment.status
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn patient_exists(conn: &Connection, id: i64) -> RepoResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM patients WHERE id = ?1", [id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn fetch_appointment(conn: &Connection, id: i64) -> RepoResult<Option<Appointment>> {
    let sql = format!("{} WHERE id = ?1", APPOINTMENT_SELECT_SQL);
    conn.query_row(&sql, [id], appointment_from_row)
        .optional()
        .map_err(Into::into)
}
