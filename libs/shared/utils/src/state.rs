use std::sync::Arc;

use sqlx::SqlitePool;

use shared_config::AppConfig;

/// Shared state handed to every router.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(config: AppConfig, db: SqlitePool) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}
