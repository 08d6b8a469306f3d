//! OTP service module for email-based verification
//!
//! This module provides the complete passcode workflow:
//! - Issuance with re-issue rate limiting and delivery rollback
//! - Verification with attempt tracking and record consumption
//! - Two-phase verification (check, then consume) for password reset
//! - Storage and delivery ports implemented by the infra crate

mod config;
mod content;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use content::{render_passcode_email, MailContent};
pub use service::OtpService;
pub use traits::{Mailer, OtpStore};
pub use types::IssueReceipt;
