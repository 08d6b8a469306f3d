//! Shared handler utilities

pub mod error;

pub use error::otp_error_response;
