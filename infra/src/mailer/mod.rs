//! Mail transport module
//!
//! This module provides the delivery side of the OTP workflow: an SMTP
//! transport for real deployments and a console mock for development and
//! tests. Content is rendered upstream by the core service; transports
//! only move a finished message.

pub mod mock;
pub mod smtp;

pub use mock::{MockMailer, SentMail};
pub use smtp::SmtpMailer;

use std::sync::Arc;

use jn_core::services::Mailer;
use jn_shared::config::{MailConfig, MailProvider};

use crate::InfraError;

/// Create a mail transport based on configuration
///
/// SMTP settings are validated at startup, so a missing or malformed
/// transport configuration fails here instead of on the first issuance.
pub fn create_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, InfraError> {
    match config.provider {
        MailProvider::Mock => {
            tracing::info!(provider = "mock", "Mail transport ready");
            Ok(Arc::new(MockMailer::new()))
        }
        MailProvider::Smtp => {
            let smtp = config.smtp.as_ref().ok_or_else(|| {
                InfraError::Config("SMTP settings are required for the smtp mailer".to_string())
            })?;
            let mailer = SmtpMailer::new(smtp)?;
            tracing::info!(provider = "smtp", host = %smtp.host, port = smtp.port, "Mail transport ready");
            Ok(Arc::new(mailer))
        }
    }
}
