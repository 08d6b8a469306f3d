//! Domain entities representing core business objects.

pub mod otp_challenge;

// Re-export commonly used types
pub use otp_challenge::{
    OtpChallenge, OtpPurpose, CODE_LENGTH, DEFAULT_EXPIRY_MINUTES, MAX_ATTEMPTS,
};
