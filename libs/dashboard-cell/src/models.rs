use serde::{Deserialize, Serialize};

use appointment_cell::models::AppointmentSummary;
use shared_models::hospital::{Department, Treatment};

/// Number of appointments shown on the admin overview.
pub const RECENT_APPOINTMENT_LIMIT: i64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub user_count: i64,
    pub appointment_count: i64,
    pub department_count: i64,
    pub recent_appointments: Vec<AppointmentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorDashboard {
    pub appointments: Vec<AppointmentSummary>,
}

/// A patient's own appointments plus what the booking form offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDashboard {
    pub appointments: Vec<AppointmentSummary>,
    pub departments: Vec<Department>,
    pub treatments: Vec<Treatment>,
}

/// The view returned by `GET /dashboard`, tagged with the caller's role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    Admin(AdminDashboard),
    Doctor(DoctorDashboard),
    Patient(PatientDashboard),
}
