//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection (development / staging / production)
//! - `mail` - Outbound mail transport configuration
//! - `otp` - Passcode lifetime and attempt budget
//! - `server` - HTTP server bind configuration
//! - `store` - OTP storage backend selection
//!
//! Everything is loaded from process environment variables once at startup.
//! Missing or malformed required values fail fast with a [`ConfigError`].

pub mod environment;
pub mod mail;
pub mod otp;
pub mod server;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use environment::Environment;
pub use mail::{MailConfig, MailProvider, SmtpConfig};
pub use otp::OtpConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};

/// Error raised while reading configuration from the process environment
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable the selected configuration requires is not set
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A variable is set but cannot be parsed into the expected shape
    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// OTP storage backend configuration
    pub store: StoreConfig,

    /// Outbound mail configuration
    pub mail: MailConfig,

    /// Passcode lifetime and attempt budget
    pub otp: OtpConfig,
}

impl AppConfig {
    /// Load the complete configuration from the process environment.
    ///
    /// Required variables (`REDIS_URL` for the redis store, the `SMTP_*`
    /// set for the smtp mail provider) are validated here so the server
    /// refuses to start with an unusable configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env()?,
            store: StoreConfig::from_env()?,
            mail: MailConfig::from_env(environment)?,
            otp: OtpConfig::from_env()?,
        })
    }

    /// In-memory store and mock mail, the setup used by tests and local
    /// development without external services.
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            store: StoreConfig::memory(),
            mail: MailConfig::mock(),
            otp: OtpConfig::default(),
        }
    }
}
