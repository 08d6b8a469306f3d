//! OTP route handlers
//!
//! This module contains the passcode endpoints:
//! - issuing a code to an email address
//! - verifying a submitted code

pub mod issue;
pub mod verify;

use std::sync::Arc;

use jn_core::services::{Mailer, OtpService, OtpStore};

/// Application state that holds the shared OTP service
pub struct AppState<S, M>
where
    S: OtpStore + ?Sized,
    M: Mailer + ?Sized,
{
    pub otp_service: Arc<OtpService<S, M>>,
}
