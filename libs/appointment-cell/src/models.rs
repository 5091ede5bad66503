// libs/appointment-cell/src/models.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shared_models::hospital::AppointmentStatus;

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// A patient's booking request. The patient is always the session's user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub department_id: i64,
    pub treatment_id: i64,
    /// `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339.
    pub appointment_datetime: String,
}

impl BookAppointmentRequest {
    pub fn new(department_id: i64, treatment_id: i64, appointment_datetime: &str) -> Self {
        Self {
            department_id,
            treatment_id,
            appointment_datetime: appointment_datetime.to_string(),
        }
    }
}

// ==============================================================================
// READ PROJECTIONS
// ==============================================================================

/// An appointment joined with the names a dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AppointmentSummary {
    pub id: i64,
    pub appointment_datetime: NaiveDateTime,
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
    pub patient_id: i64,
    pub patient_first_name: String,
    pub patient_last_name: String,
    pub doctor_id: Option<i64>,
    pub doctor_first_name: Option<String>,
    pub doctor_last_name: Option<String>,
    pub treatment_id: i64,
    pub treatment_name: String,
    pub department_id: i64,
    pub department_name: String,
}

impl AppointmentSummary {
    pub fn patient_full_name(&self) -> String {
        format!("{} {}", self.patient_first_name, self.patient_last_name)
    }

    /// `None` while no doctor is assigned.
    pub fn doctor_full_name(&self) -> Option<String> {
        match (&self.doctor_first_name, &self.doctor_last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentCounts {
    pub user_count: i64,
    pub appointment_count: i64,
    pub department_count: i64,
}
