//! Storefront configuration

use shared::{AppError, AppResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Storefront configuration
///
/// Loaded once at start-up from the environment (after `.env`), then passed
/// by value into [`ServerState::initialize`](crate::core::ServerState::initialize).
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP listen port
    pub http_port: u16,
    /// SQLite database file
    pub database_path: String,
    /// Directory that holds ingested images
    pub upload_dir: PathBuf,
    /// HMAC secret for admin session tokens
    pub session_secret: String,
    /// Bootstrap admin credentials
    pub admin_username: String,
    pub admin_password: String,
    /// Messaging number used in order deep links (country code, digits only)
    pub order_phone_number: String,
    /// Shown on the about/contact pages and in notification mail
    pub business_name: String,
    /// HTTP mail relay endpoint; unset means notifications are only logged
    pub mail_relay_url: Option<String>,
    pub mail_api_key: Option<String>,
    pub mail_from: String,
    pub mail_to: String,
    /// Delivery attempts per message before it is dead-lettered
    pub mail_max_attempts: u32,
    /// Populate the demo catalog on first start
    pub seed_demo_data: bool,
    /// Timeout for remote image downloads
    pub fetch_timeout: Duration,
    /// Log level (trace/debug/info/warn/error)
    pub log_level: String,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> AppResult<String> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(AppError::config(
                        name,
                        format!("{name} must be set in {environment} environment"),
                    ));
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(AppError::config(
                name,
                format!("{name} must not be empty in {environment} environment"),
            ));
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            http_port: env_parse("HTTP_PORT").unwrap_or(5000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "pastrystore.db".into()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/uploads")),
            session_secret: Self::require_secret("SESSION_SECRET", &environment)?,
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".into()),
            order_phone_number: std::env::var("ORDER_PHONE_NUMBER")
                .unwrap_or_else(|_| "2348012345678".into()),
            business_name: std::env::var("BUSINESS_NAME")
                .unwrap_or_else(|_| "Sweet Treats Bakery".into()),
            mail_relay_url: env_non_empty("MAIL_RELAY_URL"),
            mail_api_key: env_non_empty("MAIL_API_KEY"),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@sweettreats.example".into()),
            mail_to: std::env::var("MAIL_TO")
                .unwrap_or_else(|_| "orders@sweettreats.example".into()),
            mail_max_attempts: env_parse("MAIL_MAX_ATTEMPTS").unwrap_or(3).max(1),
            seed_demo_data: env_parse("SEED_DEMO_DATA").unwrap_or(true),
            fetch_timeout: Duration::from_secs(env_parse("FETCH_TIMEOUT_SECS").unwrap_or(10)),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: env_non_empty("LOG_DIR"),
            environment,
        })
    }

    /// Isolated configuration rooted at `dir` (database and uploads inside it)
    pub fn for_tests(dir: &Path) -> Self {
        Self {
            environment: "development".into(),
            http_port: 0,
            database_path: dir.join("storefront.db").to_string_lossy().into_owned(),
            upload_dir: dir.join("uploads"),
            session_secret: "test-session-secret".into(),
            admin_username: "admin".into(),
            admin_password: "admin123".into(),
            order_phone_number: "2348012345678".into(),
            business_name: "Sweet Treats Bakery".into(),
            mail_relay_url: None,
            mail_api_key: None,
            mail_from: "noreply@test.local".into(),
            mail_to: "owner@test.local".into(),
            mail_max_attempts: 3,
            seed_demo_data: false,
            fetch_timeout: Duration::from_secs(5),
            log_level: "debug".into(),
            log_dir: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_dev_fallback() {
        let secret =
            Config::require_secret("STOREFRONT_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(secret, "dev-STOREFRONT_TEST_UNSET_SECRET-not-for-production");
    }

    #[test]
    fn test_require_secret_missing_in_production() {
        let err = Config::require_secret("STOREFRONT_TEST_UNSET_SECRET", "production").unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ConfigError);
        assert_eq!(err.details.unwrap()["setting"], "STOREFRONT_TEST_UNSET_SECRET");
    }

    #[test]
    fn test_for_tests_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests(dir.path());
        assert!(config.upload_dir.starts_with(dir.path()));
        assert!(config.database_path.ends_with("storefront.db"));
        assert!(!config.seed_demo_data);
    }
}
