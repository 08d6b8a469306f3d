use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueOtpRequest {
    /// Recipient email address, normalized by the service before storage
    #[validate(email)]
    pub email: String,

    /// Workflow tag, "email-verification" or "password-reset"
    pub purpose: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// Email address the code was issued to
    #[validate(email)]
    pub email: String,

    /// 6-digit verification code
    #[validate(length(equal = 6))]
    pub code: String,

    /// Workflow tag, "email-verification" or "password-reset"
    pub purpose: String,
}

/// Single response envelope for both OTP endpoints
///
/// `retry_after_seconds` is present only on rate-limited issuance and
/// `remaining_attempts` only on a code mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpResponse {
    pub success: bool,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
}

impl OtpResponse {
    /// Success envelope with a human-readable message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            retry_after_seconds: None,
            remaining_attempts: None,
        }
    }

    /// Failure envelope with a human-readable message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            retry_after_seconds: None,
            remaining_attempts: None,
        }
    }

    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after_seconds = Some(seconds);
        self
    }

    pub fn with_remaining_attempts(mut self, remaining: u32) -> Self {
        self.remaining_attempts = Some(remaining);
        self
    }
}
