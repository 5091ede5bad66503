use sqlx::SqliteConnection;
use tracing::debug;

use shared_models::error::AppError;

/// Picks a doctor for a new appointment.
///
/// The policy is the first doctor whose specialization is the requested
/// department, lowest id first. It does not look at the doctor's other
/// appointments, so the same doctor can be booked twice for one instant,
/// and two concurrent bookings can both pick the same doctor.
pub struct DoctorAssignmentService;

impl DoctorAssignmentService {
    pub async fn first_matching_doctor(
        conn: &mut SqliteConnection,
        department_id: i64,
    ) -> Result<Option<i64>, AppError> {
        let doctor: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM users WHERE role = 'doctor' AND specialization_id = ? ORDER BY id LIMIT 1",
        )
        .bind(department_id)
        .fetch_optional(&mut *conn)
        .await?;

        match doctor {
            Some((doctor_id,)) => {
                debug!("Doctor {} matched department {}", doctor_id, department_id);
                Ok(Some(doctor_id))
            }
            None => {
                debug!("No doctor in department {}, appointment stays unassigned", department_id);
                Ok(None)
            }
        }
    }
}
