//! SQLite schema definition.

/// Complete database schema, applied on every open.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- AUTOINCREMENT keeps ids from being reused after a seed reset.
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    phone TEXT NOT NULL CHECK (length(trim(phone)) > 0),
    email TEXT
);

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id),
    appointment_date TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending' CHECK (length(trim(status)) > 0)
);

CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);
"#;
