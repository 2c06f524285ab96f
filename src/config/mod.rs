//! Configuration Module
//!
//! Environment-driven configuration for the server, database pool, token
//! signing and password hashing. Values are read once at startup and handed to
//! the services explicitly.

use chrono::Duration;
use thiserror::Error;

use crate::database::DatabaseConfig;
use crate::utils::security::DEFAULT_BCRYPT_COST;

/// Lowest bcrypt cost the hashing library accepts
const MIN_BCRYPT_COST: u32 = 4;

/// Highest bcrypt cost the hashing library accepts
const MAX_BCRYPT_COST: u32 = 31;

/// Configuration loading and validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Required environment variable {0} is not set")]
    Missing(String),

    /// A value is present but unusable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Environment variable helpers
pub mod env {
    use super::ConfigError;
    use std::env;

    /// Get environment variable as string with default
    pub fn get_string(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get environment variable as u16 with default
    pub fn get_u16(key: &str, default: u16) -> u16 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u32 with default
    pub fn get_u32(key: &str, default: u32) -> u32 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u64 with default
    pub fn get_u64(key: &str, default: u64) -> u64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as i64 with default
    pub fn get_i64(key: &str, default: i64) -> i64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get required environment variable
    pub fn get_required(key: &str) -> Result<String, ConfigError> {
        env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))
    }
}

/// Application configuration combining all service configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database pool configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    pub password: PasswordConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_expires_seconds: i64,
    pub refresh_expires_seconds: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_expires_seconds", &self.access_expires_seconds)
            .field("refresh_expires_seconds", &self.refresh_expires_seconds)
            .finish()
    }
}

/// Password hashing configuration
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

/// Settings injected into the authentication service
#[derive(Clone)]
pub struct AuthConfig {
    /// bcrypt cost factor used when hashing new passwords
    pub bcrypt_cost: u32,
    pub access_secret: String,
    pub access_expires_in: Duration,
    pub refresh_secret: String,
    pub refresh_expires_in: Duration,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("access_expires_in", &self.access_expires_in)
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish_non_exhaustive()
    }
}

impl AuthConfig {
    /// Auth settings with default lifetimes (24h access, 7d refresh) and cost
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            access_secret: access_secret.into(),
            access_expires_in: Duration::hours(24),
            refresh_secret: refresh_secret.into(),
            refresh_expires_in: Duration::days(7),
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_expiration(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_expires_in = access;
        self.refresh_expires_in = refresh;
        self
    }

    /// Reject settings that would produce unusable or interchangeable tokens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "bcrypt cost must be between {} and {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST
            )));
        }

        if self.access_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT access secret cannot be empty".into()));
        }

        if self.refresh_secret.is_empty() {
            return Err(ConfigError::Invalid("JWT refresh secret cannot be empty".into()));
        }

        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::Invalid(
                "JWT access and refresh secrets must be different".into(),
            ));
        }

        if self.access_expires_in <= Duration::zero() || self.refresh_expires_in <= Duration::zero()
        {
            return Err(ConfigError::Invalid(
                "JWT token lifetimes must be positive".into(),
            ));
        }

        Ok(())
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::get_string("SERVER_HOST", "0.0.0.0"),
            port: env::get_u16("SERVER_PORT", 3000),
            cors_origins: env::get_string("CORS_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether any origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            access_secret: env::get_required("JWT_ACCESS_SECRET")?,
            refresh_secret: env::get_required("JWT_REFRESH_SECRET")?,
            access_expires_seconds: env::get_i64("JWT_ACCESS_EXPIRES_SECONDS", 86_400),
            refresh_expires_seconds: env::get_i64("JWT_REFRESH_EXPIRES_SECONDS", 604_800),
        })
    }
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self {
            bcrypt_cost: env::get_u32("BCRYPT_COST", DEFAULT_BCRYPT_COST),
        }
    }
}

impl DatabaseConfig {
    /// Create database configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::get_required("DATABASE_URL")?,
            max_connections: env::get_u32("DB_MAX_CONNECTIONS", 10),
            min_connections: env::get_u32("DB_MIN_CONNECTIONS", 1),
            connect_timeout: std::time::Duration::from_secs(env::get_u64("DB_CONNECT_TIMEOUT", 10)),
            idle_timeout: std::time::Duration::from_secs(env::get_u64("DB_IDLE_TIMEOUT", 600)),
            max_lifetime: std::time::Duration::from_secs(env::get_u64("DB_MAX_LIFETIME", 3600)),
        })
    }
}

impl AppConfig {
    /// Load complete application configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            password: PasswordConfig::from_env(),
        })
    }

    /// Settings handed to the authentication service and token issuer
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            bcrypt_cost: self.password.bcrypt_cost,
            access_secret: self.jwt.access_secret.clone(),
            access_expires_in: Duration::seconds(self.jwt.access_expires_seconds),
            refresh_secret: self.jwt.refresh_secret.clone(),
            refresh_expires_in: Duration::seconds(self.jwt.refresh_expires_seconds),
        }
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid(
                "Server port must be greater than 0".into(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "Database max_connections must be greater than 0".into(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "Database min_connections cannot be greater than max_connections".into(),
            ));
        }

        self.auth_config().validate()
    }
}
