use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ParseRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Claims carried by a signed session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i64,
    pub role: Role,
    pub sid: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated context attached to a request.
///
/// Passed explicitly into every role-gated operation; there is no ambient
/// "current user".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: i64,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        allowed.contains(&self.role)
    }

    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AppError> {
        if self.has_role(allowed) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Role '{}' is not permitted to perform this action",
                self.role
            )))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: i64,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn session(role: Role) -> Session {
        Session {
            session_id: Uuid::new_v4(),
            user_id: 1,
            role,
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn role_parses_only_known_values() {
        assert_eq!("doctor".parse::<Role>().unwrap(), Role::Doctor);
        assert!("Doctor".parse::<Role>().is_err());
        assert!("nurse".parse::<Role>().is_err());
    }

    #[test]
    fn require_role_rejects_roles_outside_the_set() {
        let patient = session(Role::Patient);
        assert!(patient.require_role(&[Role::Patient]).is_ok());
        assert_matches!(patient.require_role(&[Role::Admin]), Err(AppError::Forbidden(_)));
        assert_matches!(patient.require_role(&[]), Err(AppError::Forbidden(_)));
    }
}
