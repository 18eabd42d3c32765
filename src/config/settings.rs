//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_CORS_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEV_JWT_SECRET, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// How participant names are deduplicated when a project is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParticipantScope {
    /// A name is skipped only if the same project already lists it.
    #[default]
    Software,
    /// A name is skipped if any project in the system lists it.
    Global,
}

impl FromStr for ParticipantScope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "software" => Ok(Self::Software),
            "global" => Ok(Self::Global),
            other => Err(AppError::validation(format!(
                "Unknown participant scope '{}', expected 'software' or 'global'",
                other
            ))),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub cors_origin: String,
    pub participant_scope: ParticipantScope,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("cors_origin", &self.cors_origin)
            .field("participant_scope", &self.participant_scope)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET_KEY` falls back to `SECRET_KEY`. In release builds a
    /// missing or short secret is an error; debug builds use a development
    /// default.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET_KEY")
            .or_else(|_| env::var("SECRET_KEY"))
            .ok()
        {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET_KEY not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            None => {
                return Err(AppError::internal(
                    "JWT_SECRET_KEY environment variable must be set in production",
                ));
            }
        };

        if !cfg!(debug_assertions) && jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET_KEY must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        let participant_scope = match env::var("PARTICIPANT_DEDUP_SCOPE") {
            Ok(value) => value.parse()?,
            Err(_) => ParticipantScope::default(),
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
            participant_scope,
        })
    }

    /// Build a configuration without touching the environment.
    ///
    /// Everything except the database URL and secret takes its default.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            participant_scope: ParticipantScope::default(),
        }
    }

    /// Replace the participant deduplication scope.
    pub fn with_participant_scope(mut self, scope: ParticipantScope) -> Self {
        self.participant_scope = scope;
        self
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_scope_parsing() {
        assert_eq!(
            "software".parse::<ParticipantScope>().unwrap(),
            ParticipantScope::Software
        );
        assert_eq!(
            " GLOBAL ".parse::<ParticipantScope>().unwrap(),
            ParticipantScope::Global
        );
        assert!("tenant".parse::<ParticipantScope>().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("sqlite::memory:", "super-secret-value-that-is-long-enough");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(!printed.contains("sqlite"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::new("sqlite::memory:", "secret");
        assert_eq!(config.jwt_expiration_hours, 12);
        assert_eq!(config.cors_origin, "http://localhost:5173");
        assert_eq!(config.participant_scope, ParticipantScope::Software);
        assert_eq!(config.server_addr(), "0.0.0.0:5000");
    }
}
