//! Shared utilities and common types for the JobNest OTP service
//!
//! This crate provides functionality used across all server modules:
//! - Environment-driven configuration types
//! - Utility functions (email normalization, validation, masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, Environment, MailConfig, MailProvider, OtpConfig, ServerConfig,
    SmtpConfig, StoreBackend, StoreConfig,
};
pub use utils::email;
