use std::time::Duration;

use shared::models::DEFAULT_ESTABLISHMENT;

use crate::auth::{JwtConfig, JwtError};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 5000 | HTTP listen port |
/// | DATABASE_PATH | data/hostel.db | SQLite database file |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET | generated outside production | token signing secret, >= 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | SWEEP_INTERVAL_SECS | 60 | status sweep period |
/// | COMPLAINT_DWELL_SECS | 600 | age at which a pending complaint is accepted |
/// | DEFAULT_ESTABLISHMENT | 60000 | opening credit of a new account |
/// | LOG_LEVEL | info | default log filter |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | directory for daily log files |
/// | FRONTEND_URL | (unset) | allowed CORS origin; any origin when unset |
/// | ADMIN_EMAIL | (unset) | account promoted to admin at startup |
/// | ADMIN_PASSWORD | (unset) | password used if ADMIN_EMAIL has no account yet |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 DATABASE_PATH=/var/lib/hostel/hostel.db cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_path: String,
    /// development | staging | production
    pub environment: String,
    pub jwt: JwtConfig,
    /// How often the status sweeper runs
    pub sweep_interval: Duration,
    /// How long a complaint stays pending before the sweeper accepts it
    pub complaint_dwell: Duration,
    /// Opening credit (and balance) of a new account
    pub default_establishment: f64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// Allowed CORS origin
    pub frontend_url: Option<String>,
    /// Administrator provisioned at startup
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to their defaults. Fails only if
    /// the JWT secret is unusable.
    pub fn from_env() -> Result<Self, JwtError> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig::from_env(environment == "production")?;

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/hostel.db".into()),
            environment,
            jwt,
            sweep_interval: Duration::from_secs(
                std::env::var("SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(60),
            ),
            complaint_dwell: Duration::from_secs(
                std::env::var("COMPLAINT_DWELL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(600),
            ),
            default_establishment: std::env::var("DEFAULT_ESTABLISHMENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &f64| v.is_finite() && *v >= 0.0)
                .unwrap_or(DEFAULT_ESTABLISHMENT),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            frontend_url: std::env::var("FRONTEND_URL").ok().filter(|u| !u.is_empty()),
            admin_email: std::env::var("ADMIN_EMAIL")
                .ok()
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
        })
    }

    /// Defaults with an explicit JWT configuration, no environment lookup.
    ///
    /// Used by tests and embedders.
    pub fn with_jwt(jwt: JwtConfig) -> Self {
        Self {
            http_port: 5000,
            database_path: "data/hostel.db".into(),
            environment: "development".into(),
            jwt,
            sweep_interval: Duration::from_secs(60),
            complaint_dwell: Duration::from_secs(600),
            default_establishment: DEFAULT_ESTABLISHMENT,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            frontend_url: None,
            admin_email: None,
            admin_password: None,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_jwt_defaults() {
        let config = Config::with_jwt(JwtConfig::with_secret("x".repeat(32)));
        assert_eq!(config.http_port, 5000);
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.complaint_dwell, Duration::from_secs(600));
        assert_eq!(config.default_establishment, 60_000.0);
        assert!(!config.is_production());
        assert!(config.admin_email.is_none());
    }
}
