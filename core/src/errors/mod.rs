//! Domain-specific error types and error handling.

use thiserror::Error;

/// Failures of the OTP issuance and verification workflow
///
/// Every variant is recoverable at the service boundary; callers map them
/// to structured failure responses. Only `Storage` indicates something
/// outside the protocol went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// Identity failed the email shape check before touching storage
    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    /// Candidate code is not exactly six digits
    #[error("Verification code must be exactly 6 digits")]
    InvalidCode,

    /// Purpose tag is not one of the recognized workflows
    #[error("Unknown verification purpose: {purpose}")]
    InvalidPurpose { purpose: String },

    /// A live code is already outstanding for this address and purpose
    #[error(
        "A verification code was already sent to this address. Try again in about {} minute(s)",
        (.retry_after_seconds + 59) / 60
    )]
    RateLimited { retry_after_seconds: u64 },

    /// No outstanding code for this address and purpose
    #[error("No verification code found for this address. It may have expired; request a new one")]
    NotFound,

    /// The outstanding code's lifetime has passed
    #[error("Verification code has expired. Request a new one")]
    Expired,

    /// Wrong code supplied; the attempt budget is not yet exhausted
    #[error("Invalid verification code. {remaining_attempts} attempt(s) remaining")]
    Mismatch { remaining_attempts: u32 },

    /// Attempt budget exhausted; the record has been purged
    #[error("Too many failed attempts. Request a new verification code")]
    TooManyAttempts,

    /// The mail collaborator could not deliver the message
    #[error("Failed to send verification email: {message}")]
    Delivery { message: String },

    /// The storage backend is unreachable or rejected the operation
    #[error("Verification storage error: {message}")]
    Storage { message: String },
}

pub type OtpResult<T> = Result<T, OtpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_reports_whole_minutes() {
        let err = OtpError::RateLimited {
            retry_after_seconds: 300,
        };
        assert!(err.to_string().contains("5 minute(s)"));

        // Partial minutes round up
        let err = OtpError::RateLimited {
            retry_after_seconds: 61,
        };
        assert!(err.to_string().contains("2 minute(s)"));
    }

    #[test]
    fn test_mismatch_reports_remaining_attempts() {
        let err = OtpError::Mismatch {
            remaining_attempts: 2,
        };
        assert!(err.to_string().contains("2 attempt(s)"));
    }

    #[test]
    fn test_code_shape_message_names_the_length() {
        assert!(OtpError::InvalidCode.to_string().contains("6 digits"));
    }
}
