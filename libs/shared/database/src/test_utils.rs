//! Fixtures for integration tests across the workspace: an in-memory
//! database with schema and seed data, plus helpers to mint sessions.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;

use shared_config::AppConfig;
use shared_models::auth::{Role, Session, SessionClaims};
use shared_utils::jwt::issue_token;
use shared_utils::password::PasswordService;
use shared_utils::session::SessionStore;
use shared_utils::state::AppState;

use crate::{connect, initialize, seed::seed_reference_data};

pub const TEST_SESSION_SECRET: &str = "test-secret-key-for-session-tokens-must-be-long-enough";

pub struct TestConfig {
    pub session_secret: String,
    pub database_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            session_secret: TEST_SESSION_SECRET.to_string(),
            database_url: "sqlite::memory:".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database_url.clone(),
            session_secret: self.session_secret.clone(),
            ..AppConfig::default()
        }
    }
}

/// Schema only, no rows.
pub async fn empty_test_pool() -> SqlitePool {
    let pool = connect(&TestConfig::default().to_app_config())
        .await
        .expect("in-memory database should open");
    initialize(&pool).await.expect("schema should apply");
    pool
}

/// Schema plus the standard seed data.
pub async fn test_pool() -> SqlitePool {
    let pool = empty_test_pool().await;
    seed_reference_data(&pool).await.expect("seed should apply");
    pool
}

pub async fn test_state() -> Arc<AppState> {
    let pool = test_pool().await;
    Arc::new(AppState::new(TestConfig::default().to_app_config(), pool))
}

/// Schema plus seed data in a database file at `path`, behind a pool of
/// `max_connections` real connections. Used where concurrent transactions
/// must actually overlap.
pub async fn file_test_state(path: &Path, max_connections: u32) -> Arc<AppState> {
    let config = TestConfig {
        database_url: format!("sqlite://{}?mode=rwc", path.display()),
        ..TestConfig::default()
    }
    .to_app_config();
    let config = AppConfig {
        database_max_connections: max_connections,
        ..config
    };

    let pool = connect(&config).await.expect("database file should open");
    initialize(&pool).await.expect("schema should apply");
    seed_reference_data(&pool).await.expect("seed should apply");
    Arc::new(AppState::new(config, pool))
}

pub struct TestUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub specialization_id: Option<i64>,
}

impl TestUser {
    pub fn new(username: &str, role: Role) -> Self {
        Self {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: format!("{}-password", username),
            role,
            specialization_id: None,
        }
    }

    pub fn patient(username: &str) -> Self {
        Self::new(username, Role::Patient)
    }

    pub fn admin(username: &str) -> Self {
        Self::new(username, Role::Admin)
    }

    pub fn doctor(username: &str, department_id: i64) -> Self {
        Self {
            specialization_id: Some(department_id),
            ..Self::new(username, Role::Doctor)
        }
    }

    /// Inserts the user directly, bypassing registration rules.
    pub async fn insert(&self, pool: &SqlitePool) -> i64 {
        let password_hash = PasswordService::hash_password(&self.password).expect("hashing should succeed");

        let (id,): (i64,) = sqlx::query_as(
            r#"INSERT INTO users
               (specialization_id, first_name, last_name, username, email, password_hash, role, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(self.specialization_id)
        .bind("Test")
        .bind(&self.username)
        .bind(&self.username)
        .bind(&self.email)
        .bind(password_hash)
        .bind(self.role.as_str())
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .expect("test user insert should succeed");

        id
    }
}

pub async fn department_id(pool: &SqlitePool, name: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM departments WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("department should exist");
    id
}

pub async fn treatment_id(pool: &SqlitePool, name: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM treatments WHERE treatment_name = ? ORDER BY id LIMIT 1")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("treatment should exist");
    id
}

pub async fn user_id(pool: &SqlitePool, username: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .expect("user should exist");
    id
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    /// Opens a stored session for `user_id` and returns its bearer token.
    pub async fn session_token(state: &AppState, user_id: i64, role: Role) -> String {
        let session = SessionStore::new(&state.db)
            .create(user_id, role, state.config.session_ttl_hours)
            .await
            .expect("session should be stored");

        let claims = SessionClaims {
            sub: user_id,
            role,
            sid: session.session_id,
            iat: Utc::now().timestamp(),
            exp: session.expires_at.timestamp(),
        };
        issue_token(&claims, &state.config.session_secret).expect("token should sign")
    }

    /// A correctly signed token whose session was never stored.
    pub fn orphan_token(state: &AppState, user_id: i64, role: Role) -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id,
            role,
            sid: uuid::Uuid::new_v4(),
            iat: now,
            exp: now + 3600,
        };
        issue_token(&claims, &state.config.session_secret).expect("token should sign")
    }
}

/// An in-memory session for calling services directly, without a token.
pub fn test_session(user_id: i64, role: Role) -> Session {
    Session {
        session_id: uuid::Uuid::new_v4(),
        user_id,
        role,
        expires_at: Utc::now() + chrono::Duration::hours(1),
    }
}
