//! Configuration for the OTP service

use crate::domain::entities::otp_challenge::{DEFAULT_EXPIRY_MINUTES, MAX_ATTEMPTS};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before a passcode expires
    pub expiry_minutes: i64,
    /// Maximum number of verification attempts allowed
    pub max_attempts: u32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}
