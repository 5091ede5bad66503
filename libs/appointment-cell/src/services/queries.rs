use sqlx::SqlitePool;
use tracing::debug;

use shared_models::error::AppError;
use shared_utils::state::AppState;

use crate::models::{AppointmentCounts, AppointmentSummary};

const SUMMARY_SELECT: &str = r#"
SELECT a.id,
       a.appointment_datetime,
       a.status,
       a.patient_id,
       p.first_name AS patient_first_name,
       p.last_name  AS patient_last_name,
       a.doctor_id,
       d.first_name AS doctor_first_name,
       d.last_name  AS doctor_last_name,
       a.treatment_id,
       t.treatment_name,
       a.department_id,
       dep.name AS department_name
FROM appointments a
JOIN users p          ON p.id = a.patient_id
LEFT JOIN users d     ON d.id = a.doctor_id
JOIN treatments t     ON t.id = a.treatment_id
JOIN departments dep  ON dep.id = a.department_id
"#;

/// Read-only appointment projections used by the dashboards. Each is backed
/// by an index on its filter and sort columns.
pub struct AppointmentQueryService {
    db: SqlitePool,
}

impl AppointmentQueryService {
    pub fn new(state: &AppState) -> Self {
        Self { db: state.db.clone() }
    }

    pub fn with_pool(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Appointments assigned to a doctor, earliest first.
    pub async fn appointments_for_doctor(&self, doctor_id: i64) -> Result<Vec<AppointmentSummary>, AppError> {
        let sql = format!(
            "{} WHERE a.doctor_id = ? ORDER BY a.appointment_datetime ASC, a.id ASC",
            SUMMARY_SELECT
        );
        let rows = sqlx::query_as::<_, AppointmentSummary>(&sql)
            .bind(doctor_id)
            .fetch_all(&self.db)
            .await?;

        debug!("Doctor {} has {} appointments", doctor_id, rows.len());
        Ok(rows)
    }

    /// Appointments requested by a patient, earliest first.
    pub async fn appointments_for_patient(&self, patient_id: i64) -> Result<Vec<AppointmentSummary>, AppError> {
        let sql = format!(
            "{} WHERE a.patient_id = ? ORDER BY a.appointment_datetime ASC, a.id ASC",
            SUMMARY_SELECT
        );
        let rows = sqlx::query_as::<_, AppointmentSummary>(&sql)
            .bind(patient_id)
            .fetch_all(&self.db)
            .await?;

        debug!("Patient {} has {} appointments", patient_id, rows.len());
        Ok(rows)
    }

    /// The latest appointments by appointment time, latest first.
    pub async fn recent_appointments(&self, limit: i64) -> Result<Vec<AppointmentSummary>, AppError> {
        let sql = format!(
            "{} ORDER BY a.appointment_datetime DESC, a.id DESC LIMIT ?",
            SUMMARY_SELECT
        );
        let rows = sqlx::query_as::<_, AppointmentSummary>(&sql)
            .bind(limit.max(0))
            .fetch_all(&self.db)
            .await?;

        Ok(rows)
    }

    pub async fn counts(&self) -> Result<AppointmentCounts, AppError> {
        let (user_count, appointment_count, department_count): (i64, i64, i64) = sqlx::query_as(
            r#"SELECT (SELECT COUNT(*) FROM users),
                      (SELECT COUNT(*) FROM appointments),
                      (SELECT COUNT(*) FROM departments)"#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(AppointmentCounts {
            user_count,
            appointment_count,
            department_count,
        })
    }
}
