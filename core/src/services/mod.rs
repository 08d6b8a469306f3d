//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    IssueReceipt, MailContent, Mailer, OtpService, OtpServiceConfig, OtpStore,
};
