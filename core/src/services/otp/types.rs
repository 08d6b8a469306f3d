//! Types for OTP service results

use chrono::{DateTime, Utc};

use crate::domain::entities::otp_challenge::OtpPurpose;

/// Result of a successful issuance
///
/// Deliberately does not carry the code: once created, a passcode is only
/// ever readable through the verification comparison.
#[derive(Debug, Clone)]
pub struct IssueReceipt {
    /// Normalized address the code was sent to
    pub email: String,
    /// Workflow the challenge belongs to
    pub purpose: OtpPurpose,
    /// When the challenge stops being verifiable
    pub expires_at: DateTime<Utc>,
}
