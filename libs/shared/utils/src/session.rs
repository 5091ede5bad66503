use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use shared_models::auth::{Role, Session};
use shared_models::error::AppError;

/// Server-side record of issued sessions, so logout can revoke a token
/// before it expires.
pub struct SessionStore<'a> {
    db: &'a SqlitePool,
}

impl<'a> SessionStore<'a> {
    pub fn new(db: &'a SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, user_id: i64, role: Role, ttl_hours: i64) -> Result<Session, AppError> {
        let now = Utc::now();
        let expires_at = Duration::try_hours(ttl_hours)
            .filter(|ttl| *ttl > Duration::zero())
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::Internal(format!("Session lifetime of {} hours is out of range", ttl_hours))
            })?;

        let session = Session {
            session_id: Uuid::new_v4(),
            user_id,
            role,
            expires_at,
        };

        sqlx::query(
            "INSERT INTO sessions (session_id, user_id, role, created_at, expires_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(session.session_id)
        .bind(session.user_id)
        .bind(session.role.as_str())
        .bind(now)
        .bind(session.expires_at)
        .execute(self.db)
        .await?;

        debug!("Session {} created for user {}", session.session_id, user_id);
        Ok(session)
    }

    /// Looks up a session that has not been revoked and has not expired.
    pub async fn find_active(&self, session_id: Uuid) -> Result<Option<Session>, AppError> {
        let row: Option<(Uuid, i64, String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT session_id, user_id, role, expires_at FROM sessions WHERE session_id = ?",
        )
        .bind(session_id)
        .fetch_optional(self.db)
        .await?;

        let Some((session_id, user_id, role, expires_at)) = row else {
            return Ok(None);
        };

        if expires_at <= Utc::now() {
            debug!("Session {} has expired", session_id);
            return Ok(None);
        }

        let role = role
            .parse::<Role>()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Some(Session {
            session_id,
            user_id,
            role,
            expires_at,
        }))
    }

    pub async fn revoke(&self, session_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE session_id = ?")
            .bind(session_id)
            .execute(self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(self.db)
            .await?;

        Ok(result.rows_affected())
    }
}
