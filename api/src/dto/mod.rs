//! Request and response types for the HTTP surface

pub mod otp;

pub use otp::{IssueOtpRequest, OtpResponse, VerifyOtpRequest};
