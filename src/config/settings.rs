//! Application settings loaded from environment variables.

use std::env;

use chrono::Duration;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_MINUTES, DEFAULT_DATABASE_URL, DEFAULT_REFRESH_TOKEN_HOURS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEV_JWT_SECRET, MAX_ACCESS_TOKEN_MINUTES,
    MAX_REFRESH_TOKEN_HOURS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    access_token_minutes: i64,
    refresh_token_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_hours", &self.refresh_token_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build or shorter than
    /// the minimum length.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        Self::builder(jwt_secret)
            .database_url(
                env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            )
            .access_token_minutes(
                parse_var("JWT_ACCESS_TOKEN_MINUTES").unwrap_or(DEFAULT_ACCESS_TOKEN_MINUTES),
            )
            .refresh_token_hours(
                parse_var("JWT_REFRESH_TOKEN_HOURS").unwrap_or(DEFAULT_REFRESH_TOKEN_HOURS),
            )
            .server_host(
                env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            )
            .server_port(parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT))
            .build()
    }

    /// Start a configuration with defaults for everything but the secret.
    pub fn builder(jwt_secret: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder {
            config: Self {
                database_url: DEFAULT_DATABASE_URL.to_string(),
                jwt_secret: jwt_secret.into(),
                access_token_minutes: DEFAULT_ACCESS_TOKEN_MINUTES,
                refresh_token_hours: DEFAULT_REFRESH_TOKEN_HOURS,
                server_host: DEFAULT_SERVER_HOST.to_string(),
                server_port: DEFAULT_SERVER_PORT,
            },
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Lifetime of issued access tokens.
    pub fn access_token_lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_minutes)
    }

    /// Lifetime of issued refresh tokens.
    pub fn refresh_token_lifetime(&self) -> Duration {
        Duration::hours(self.refresh_token_hours)
    }
}

/// Builder used by `from_env` and by tests that need a config without
/// touching the process environment.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    pub fn access_token_minutes(mut self, minutes: i64) -> Self {
        self.config.access_token_minutes = minutes;
        self
    }

    pub fn refresh_token_hours(mut self, hours: i64) -> Self {
        self.config.refresh_token_hours = hours;
        self
    }

    pub fn server_host(mut self, host: impl Into<String>) -> Self {
        self.config.server_host = host.into();
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    /// Validate and finish the configuration.
    pub fn build(self) -> AppResult<Config> {
        if self.config.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        check_lifetime(
            "JWT_ACCESS_TOKEN_MINUTES",
            self.config.access_token_minutes,
            MAX_ACCESS_TOKEN_MINUTES,
        )?;
        check_lifetime(
            "JWT_REFRESH_TOKEN_HOURS",
            self.config.refresh_token_hours,
            MAX_REFRESH_TOKEN_HOURS,
        )?;

        Ok(self.config)
    }
}

/// Lifetimes outside `1..=max` are rejected here so that building a
/// `Duration` from them later cannot overflow.
fn check_lifetime(key: &str, value: i64, max: i64) -> AppResult<()> {
    if !(1..=max).contains(&value) {
        return Err(AppError::internal(format!(
            "{} must be between 1 and {}, got {}",
            key, max, value
        )));
    }
    Ok(())
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_builder_defaults() {
        let config = Config::builder(SECRET).build().unwrap();

        assert_eq!(config.access_token_lifetime(), Duration::minutes(5));
        assert_eq!(config.refresh_token_lifetime(), Duration::hours(24));
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::builder("too-short").build();
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_non_positive_lifetime_rejected() {
        let result = Config::builder(SECRET).access_token_minutes(0).build();
        assert!(result.is_err());

        let result = Config::builder(SECRET).refresh_token_hours(-1).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_lifetime_rejected() {
        let result = Config::builder(SECRET).access_token_minutes(i64::MAX).build();
        assert!(matches!(result, Err(AppError::Internal(_))));

        let result = Config::builder(SECRET)
            .refresh_token_hours(1_000_000_000_000)
            .build();
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_lifetime_upper_bounds_accepted() {
        let config = Config::builder(SECRET)
            .access_token_minutes(MAX_ACCESS_TOKEN_MINUTES)
            .refresh_token_hours(MAX_REFRESH_TOKEN_HOURS)
            .build()
            .unwrap();

        assert_eq!(config.access_token_lifetime(), Duration::days(1));
        assert_eq!(config.refresh_token_lifetime(), Duration::days(365));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::builder(SECRET).build().unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains(SECRET));
        assert!(debug.contains("[REDACTED]"));
    }
}
