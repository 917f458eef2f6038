pub mod appointment;
pub mod datetime;
pub mod error;
pub mod patient;

pub use appointment::{Appointment, AppointmentWithPatient, NewAppointment};
pub use error::{AppError, ValidationError};
pub use patient::{NewPatient, Patient};
