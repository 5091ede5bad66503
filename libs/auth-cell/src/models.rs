use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Self-service sign-up. Always creates a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl RegisterPatientRequest {
    pub fn new(first_name: &str, last_name: &str, username: &str, email: &str, password: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: None,
            date_of_birth: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: i64,
    pub message: String,
}
