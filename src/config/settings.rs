//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_SECONDS, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_STANDINGS_CACHE_TTL_SECONDS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub jwt_expiration_seconds: i64,
    pub server_host: String,
    pub server_port: u16,
    pub standings_cache_ttl_seconds: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_seconds", &self.jwt_expiration_seconds)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("standings_cache_ttl_seconds", &self.standings_cache_ttl_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from `.env` and environment variables.
    ///
    /// Fails if `JWT_SECRET` is missing in a release build or shorter than
    /// the minimum length.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            jwt_secret,
            jwt_expiration_seconds: parse_or("JWT_EXPIRATION_SECONDS", DEFAULT_JWT_EXPIRATION_SECONDS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            standings_cache_ttl_seconds: parse_or(
                "STANDINGS_CACHE_TTL_SECONDS",
                DEFAULT_STANDINGS_CACHE_TTL_SECONDS,
            ),
        }
        .validated()
    }

    /// Build a configuration with an explicit secret and defaults elsewhere.
    pub fn with_secret(jwt_secret: impl Into<String>) -> AppResult<Self> {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_seconds: DEFAULT_JWT_EXPIRATION_SECONDS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            standings_cache_ttl_seconds: DEFAULT_STANDINGS_CACHE_TTL_SECONDS,
        }
        .validated()
    }

    fn validated(self) -> AppResult<Self> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        Ok(self)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        assert!(Config::with_secret("too-short").is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::with_secret("a-very-long-secret-value-for-tests-123").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("a-very-long-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::with_secret("a-very-long-secret-value-for-tests-123").unwrap();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }
}
