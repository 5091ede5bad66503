use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};

use shared_config::AppConfig;
use shared_database::begin_immediate;
use shared_database::error::constraint_violation;
use shared_models::auth::{Role, Session, SessionClaims, TokenResponse};
use shared_models::error::AppError;
use shared_models::hospital::User;
use shared_utils::jwt::issue_token;
use shared_utils::password::PasswordService;
use shared_utils::session::SessionStore;
use shared_utils::state::AppState;
use shared_utils::validation::{optional, required, validate_email};

use crate::models::RegisterPatientRequest;

const USER_COLUMNS: &str = "id, role, first_name, last_name, username, email, password_hash, \
                            phone, date_of_birth, specialization_id, created_at";

pub struct IdentityService {
    db: SqlitePool,
    config: Arc<AppConfig>,
}

impl IdentityService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            config: Arc::clone(&state.config),
        }
    }

    /// Succeeds only when the username exists and the password verifies
    /// against its stored hash. Unknown users and wrong passwords fail the
    /// same way.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<i64, AppError> {
        self.verify_credentials(username, password).await.map(|user| user.id)
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register_patient(&self, request: RegisterPatientRequest) -> Result<i64, AppError> {
        let first_name = required("first_name", &request.first_name)?;
        let last_name = required("last_name", &request.last_name)?;
        let username = required("username", &request.username)?;
        let email = required("email", &request.email)?;
        if request.password.is_empty() {
            return Err(AppError::InvalidInput("password is required".to_string()));
        }
        if !validate_email(&email) {
            return Err(AppError::InvalidInput(format!("'{}' is not a valid email address", email)));
        }

        let password_hash = PasswordService::hash_password(&request.password)?;

        let mut tx = begin_immediate(&self.db).await?;

        let inserted: Result<(i64,), sqlx::Error> = sqlx::query_as(
            r#"INSERT INTO users
               (first_name, last_name, username, email, password_hash, role, phone, date_of_birth, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(&username)
        .bind(&email)
        .bind(password_hash)
        .bind(Role::Patient.as_str())
        .bind(optional(request.phone.as_deref()))
        .bind(request.date_of_birth)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await;

        let (user_id,) = inserted.map_err(|e| match constraint_violation(&e) {
            Some(v) if v.is_unique_on("users.username") => AppError::DuplicateUsername(username.clone()),
            Some(v) if v.is_unique_on("users.email") => AppError::DuplicateEmail(email.clone()),
            _ => AppError::from(e),
        })?;

        tx.commit().await?;

        info!("Registered patient {} as user {}", username, user_id);
        Ok(user_id)
    }

    /// Authenticates and opens a stored session, returning its signed token.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, AppError> {
        if self.config.session_secret.is_empty() {
            return Err(AppError::Internal("Session signing is not configured".to_string()));
        }

        let user = self.verify_credentials(username, password).await?;

        let store = SessionStore::new(&self.db);
        let purged = store.purge_expired().await?;
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }

        let session = store
            .create(user.id, user.role, self.config.session_ttl_hours)
            .await?;

        let claims = SessionClaims {
            sub: user.id,
            role: user.role,
            sid: session.session_id,
            iat: Utc::now().timestamp(),
            exp: session.expires_at.timestamp(),
        };
        let token = issue_token(&claims, &self.config.session_secret).map_err(AppError::Internal)?;

        info!("User {} logged in as {}", user.id, user.role);
        Ok(TokenResponse {
            token,
            user_id: user.id,
            role: user.role,
            expires_at: session.expires_at,
        })
    }

    #[instrument(skip(self, session), fields(session_id = %session.session_id))]
    pub async fn logout(&self, session: &Session) -> Result<(), AppError> {
        let revoked = SessionStore::new(&self.db).revoke(session.session_id).await?;
        if !revoked {
            warn!("Session {} was already gone at logout", session.session_id);
        }
        Ok(())
    }

    pub async fn profile(&self, session: &Session) -> Result<User, AppError> {
        self.find_user(session.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", session.user_id)))
    }

    pub async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    async fn verify_credentials(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS))
            .bind(username)
            .fetch_optional(&self.db)
            .await?;

        let Some(user) = user else {
            debug!("Login attempt for unknown username");
            return Err(AppError::InvalidCredentials);
        };

        if !PasswordService::verify_password(password, &user.password_hash)? {
            debug!("Password mismatch for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}
