use std::env;
use tracing::warn;

pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub bind_address: String,
    pub seed_on_startup: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using default");
                    "sqlite://hospital.db?mode=rwc".to_string()
                }),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("DATABASE_MAX_CONNECTIONS not set or invalid, using default");
                    5
                }),
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SESSION_SECRET not set, using empty value");
                    String::new()
                }),
            session_ttl_hours: session_ttl_hours(env::var("SESSION_TTL_HOURS").ok().as_deref()),
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| {
                    warn!("BIND_ADDRESS not set, using default");
                    "0.0.0.0:3000".to_string()
                }),
            seed_on_startup: env::var("SEED_ON_STARTUP")
                .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.session_secret.is_empty() && !self.database_url.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            session_secret: String::new(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            bind_address: "0.0.0.0:3000".to_string(),
            seed_on_startup: true,
        }
    }
}

/// Parses a session lifetime, falling back to the default when the value is
/// missing, not a number, or outside `1..=MAX_SESSION_TTL_HOURS`.
fn session_ttl_hours(value: Option<&str>) -> i64 {
    match value.map(|v| v.trim().parse::<i64>()) {
        Some(Ok(hours)) if (1..=MAX_SESSION_TTL_HOURS).contains(&hours) => hours,
        Some(_) => {
            warn!(
                "SESSION_TTL_HOURS must be between 1 and {}, using default",
                MAX_SESSION_TTL_HOURS
            );
            DEFAULT_SESSION_TTL_HOURS
        }
        None => {
            warn!("SESSION_TTL_HOURS not set, using default");
            DEFAULT_SESSION_TTL_HOURS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ttl_accepts_values_in_range() {
        assert_eq!(session_ttl_hours(Some("12")), 12);
        assert_eq!(session_ttl_hours(Some(" 1 ")), 1);
        assert_eq!(session_ttl_hours(Some("8760")), MAX_SESSION_TTL_HOURS);
    }

    #[test]
    fn session_ttl_falls_back_when_out_of_range_or_invalid() {
        for value in ["0", "-5", "8761", "9223372036854775807", "forever", ""] {
            assert_eq!(session_ttl_hours(Some(value)), DEFAULT_SESSION_TTL_HOURS, "{value:?}");
        }
        assert_eq!(session_ttl_hours(None), DEFAULT_SESSION_TTL_HOURS);
    }
}
