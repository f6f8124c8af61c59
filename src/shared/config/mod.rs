//! Application configuration module
//!
//! `AppConfig` holds everything the server needs at startup. It is
//! assembled with `AppConfigBuilder`, either by hand (tests) or from the
//! process environment via [`AppConfig::from_env`].
//!
//! | Variable           | Default                          |
//! |--------------------|----------------------------------|
//! | `DATABASE_URL`     | `sqlite://platewise.db?mode=rwc` |
//! | `SERVER_PORT`      | `3000`                           |
//! | `JWT_SECRET`       | development secret (warns)       |
//! | `SESSION_TTL_DAYS` | `30`                             |
//! | `BCRYPT_COST`      | `bcrypt::DEFAULT_COST`           |

use std::str::FromStr;

use thiserror::Error;

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://platewise.db?mode=rwc";

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Default session lifetime in days
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

/// Longest accepted session lifetime (a century)
pub const MAX_SESSION_TTL_DAYS: i64 = 36_500;

const DEV_JWT_SECRET: &str = "platewise-development-secret";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// Port the HTTP server binds to
    pub port: u16,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// How long a login session stays valid
    pub session_ttl_days: i64,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = parse_var::<u16>("SERVER_PORT")? {
            builder = builder.port(port);
        }
        match std::env::var("JWT_SECRET") {
            Ok(secret) => builder = builder.jwt_secret(secret),
            Err(_) => tracing::warn!("JWT_SECRET not set, using the development secret"),
        }
        if let Some(days) = parse_var::<i64>("SESSION_TTL_DAYS")? {
            builder = builder.session_ttl_days(days);
        }
        if let Some(cost) = parse_var::<u32>("BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("database_url"));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                key: "port",
                message: "port must be non-zero".to_string(),
            });
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt_secret"));
        }
        if !(1..=MAX_SESSION_TTL_DAYS).contains(&self.session_ttl_days) {
            return Err(ConfigError::Invalid {
                key: "session_ttl_days",
                message: format!(
                    "session lifetime of {} days is outside 1..={}",
                    self.session_ttl_days, MAX_SESSION_TTL_DAYS
                ),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "bcrypt_cost",
                message: format!("cost {} is outside 4..=31", self.bcrypt_cost),
            });
        }
        Ok(())
    }

    /// Whether the database lives only in memory
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    port: Option<u16>,
    jwt_secret: Option<String>,
    session_ttl_days: Option<i64>,
    bcrypt_cost: Option<u32>,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the session token secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn session_ttl_days(mut self, days: i64) -> Self {
        self.session_ttl_days = Some(days);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            database_url: self.database_url.unwrap_or(defaults.database_url),
            port: self.port.unwrap_or(defaults.port),
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            session_ttl_days: self.session_ttl_days.unwrap_or(defaults.session_ttl_days),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

fn parse_var<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                key,
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
