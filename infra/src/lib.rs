//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the JobNest backend.
//! It provides the concrete storage backends behind the core's `OtpStore`
//! port and the mail transports behind its `Mailer` port.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Store**: Redis, in-memory, and file-backed OTP stores
//! - **Mailer**: SMTP delivery via lettre, plus a console mock for development
//!
//! Backends are selected at startup from configuration through the
//! [`store::create_store`] and [`mailer::create_mailer`] factories.

/// Mailer module - SMTP and mock mail transports
pub mod mailer;

/// Store module - OTP storage backends
pub mod store;

pub use mailer::{create_mailer, MockMailer, SmtpMailer};
pub use store::{create_store, FileOtpStore, MemoryOtpStore, RedisClient, RedisOtpStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// Redis connection or command error
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Local filesystem error from the file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SMTP transport error
    #[error("Mail transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Mail message construction error
    #[error("Mail message error: {0}")]
    Mail(#[from] lettre::error::Error),

    /// Malformed mail address
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
