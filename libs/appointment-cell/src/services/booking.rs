// libs/appointment-cell/src/services/booking.rs
use chrono::{DateTime, NaiveDateTime, Timelike};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{info, instrument};

use shared_database::begin_immediate;
use shared_models::auth::{Role, Session};
use shared_models::error::AppError;
use shared_models::hospital::{Appointment, AppointmentStatus};
use shared_utils::state::AppState;

use crate::models::BookAppointmentRequest;
use crate::services::assignment::DoctorAssignmentService;

const ACCEPTED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parses a booking timestamp. Accepts the `datetime-local` form
/// (`2025-03-01T10:00`), the same with seconds, or RFC 3339 with an offset,
/// which is normalized to UTC. Sub-second precision is dropped.
pub fn parse_appointment_datetime(input: &str) -> Result<NaiveDateTime, AppError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::InvalidInput("appointment_datetime is required".to_string()));
    }

    let parsed = ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.naive_utc()));

    parsed
        .and_then(|dt| dt.with_nanosecond(0))
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "'{}' is not a valid appointment time (expected YYYY-MM-DDTHH:MM)",
                input
            ))
        })
}

pub struct AppointmentBookingService {
    db: SqlitePool,
}

impl AppointmentBookingService {
    pub fn new(state: &AppState) -> Self {
        Self { db: state.db.clone() }
    }

    pub fn with_pool(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Books an appointment for the session's patient and auto-assigns the
    /// first doctor of the department, if any. Everything happens in one
    /// transaction; on any failure no appointment row is left behind.
    #[instrument(skip(self, session), fields(patient_id = session.user_id))]
    pub async fn book_appointment(
        &self,
        session: &Session,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppError> {
        session.require_role(&[Role::Patient])?;

        let appointment_datetime = parse_appointment_datetime(&request.appointment_datetime)?;

        let mut tx = begin_immediate(&self.db).await?;

        Self::verify_patient(&mut *tx, session.user_id).await?;
        Self::verify_reference(&mut *tx, "departments", "Department", request.department_id).await?;
        Self::verify_reference(&mut *tx, "treatments", "Treatment", request.treatment_id).await?;

        let doctor_id = DoctorAssignmentService::first_matching_doctor(&mut *tx, request.department_id).await?;

        let appointment = sqlx::query_as::<_, Appointment>(
            r#"INSERT INTO appointments
               (appointment_datetime, status, patient_id, doctor_id, treatment_id, department_id)
               VALUES (?, ?, ?, ?, ?, ?)
               RETURNING id, appointment_datetime, status, patient_id, doctor_id, treatment_id, department_id"#,
        )
        .bind(appointment_datetime)
        .bind(AppointmentStatus::Booked.as_str())
        .bind(session.user_id)
        .bind(doctor_id)
        .bind(request.treatment_id)
        .bind(request.department_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        match appointment.doctor_id {
            Some(doctor_id) => info!(
                "Appointment {} booked for patient {} with doctor {}",
                appointment.id, appointment.patient_id, doctor_id
            ),
            None => info!(
                "Appointment {} booked for patient {}, pending doctor assignment",
                appointment.id, appointment.patient_id
            ),
        }

        Ok(appointment)
    }

    async fn verify_patient(conn: &mut SqliteConnection, user_id: i64) -> Result<(), AppError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT role FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?;

        let Some((role,)) = row else {
            return Err(AppError::NotFound(format!("Patient {} not found", user_id)));
        };

        if role != Role::Patient.as_str() {
            return Err(AppError::Forbidden(format!(
                "User {} is not a patient and cannot book appointments",
                user_id
            )));
        }

        Ok(())
    }

    async fn verify_reference(
        conn: &mut SqliteConnection,
        table: &str,
        label: &str,
        id: i64,
    ) -> Result<(), AppError> {
        let row: Option<(i64,)> = sqlx::query_as(&format!("SELECT id FROM {} WHERE id = ?", table))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        row.map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", label, id)))
    }
}
