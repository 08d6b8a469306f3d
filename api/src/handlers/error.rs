//! Maps OTP service errors to HTTP responses
//!
//! Verification failures share a 400 status and are distinguished by the
//! message, with `Mismatch` also carrying the remaining-attempts count.
//! Rate limiting maps to 429, delivery trouble to 503, and storage trouble
//! to 500 with the internals kept out of the client-facing message.

use actix_web::HttpResponse;
use tracing::error;

use jn_core::errors::OtpError;

use crate::dto::OtpResponse;

/// Convert an `OtpError` into the matching HTTP response
pub fn otp_error_response(otp_error: &OtpError) -> HttpResponse {
    match otp_error {
        OtpError::InvalidEmail { .. } | OtpError::InvalidCode | OtpError::InvalidPurpose { .. } => {
            HttpResponse::BadRequest().json(OtpResponse::error(otp_error.to_string()))
        }

        OtpError::RateLimited {
            retry_after_seconds,
        } => HttpResponse::TooManyRequests().json(
            OtpResponse::error(otp_error.to_string()).with_retry_after(*retry_after_seconds),
        ),

        OtpError::NotFound | OtpError::Expired | OtpError::TooManyAttempts => {
            HttpResponse::BadRequest().json(OtpResponse::error(otp_error.to_string()))
        }

        OtpError::Mismatch { remaining_attempts } => HttpResponse::BadRequest().json(
            OtpResponse::error(otp_error.to_string()).with_remaining_attempts(*remaining_attempts),
        ),

        OtpError::Delivery { .. } => HttpResponse::ServiceUnavailable().json(OtpResponse::error(
            "Could not send the verification email. Please try again later",
        )),

        OtpError::Storage { message } => {
            error!(error = %message, "Storage failure while handling OTP request");
            HttpResponse::InternalServerError().json(OtpResponse::error(
                "An internal error occurred. Please try again later",
            ))
        }
    }
}
