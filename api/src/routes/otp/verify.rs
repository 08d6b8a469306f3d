use actix_web::{web, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::{OtpResponse, VerifyOtpRequest};
use crate::handlers::otp_error_response;
use crate::routes::otp::AppState;

use jn_core::domain::entities::otp_challenge::OtpPurpose;
use jn_core::errors::OtpError;
use jn_core::services::{Mailer, OtpStore};
use jn_shared::utils::mask_email;

/// Handler for POST /api/v1/otp/verify
///
/// Checks a submitted passcode against the outstanding challenge for the
/// address. An `email-verification` match consumes the record on the spot;
/// a `password-reset` match leaves it in place so the reset step can
/// consume it once the new password is accepted.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "code": "123456",
///     "purpose": "email-verification"
/// }
/// ```
///
/// # Responses
///
/// * `200` - Code matched
/// * `400` - Malformed input, no live challenge, expired or wrong code
///           (a wrong code carries `remainingAttempts`)
/// * `500` - Storage backend failed
pub async fn verify<S, M>(
    state: web::Data<AppState<S, M>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + ?Sized + 'static,
    M: Mailer + ?Sized + 'static,
{
    if let Err(validation_errors) = request.0.validate() {
        warn!(
            email = %mask_email(&request.email),
            errors = %validation_errors,
            "Rejected malformed verify request"
        );
        return HttpResponse::BadRequest().json(OtpResponse::error(
            "Please provide a valid email address and a 6-digit code",
        ));
    }

    let purpose = match request.purpose.parse::<OtpPurpose>() {
        Ok(purpose) => purpose,
        Err(_) => {
            return otp_error_response(&OtpError::InvalidPurpose {
                purpose: request.purpose.clone(),
            });
        }
    };

    info!(
        email = %mask_email(&request.email),
        purpose = %purpose,
        "Processing passcode verify request"
    );

    // Email verification is complete once the code matches, so the
    // challenge is consumed here. A password reset still has the actual
    // reset step ahead of it, so the challenge stays until that step
    // consumes it.
    let result = match purpose {
        OtpPurpose::EmailVerification => {
            state
                .otp_service
                .verify(&request.email, &request.code, purpose)
                .await
        }
        OtpPurpose::PasswordReset => {
            state
                .otp_service
                .check(&request.email, &request.code, purpose)
                .await
        }
    };

    match result {
        Ok(()) => {
            info!(
                email = %mask_email(&request.email),
                purpose = %purpose,
                "Passcode verified"
            );
            HttpResponse::Ok().json(OtpResponse::ok("Verification successful"))
        }
        Err(otp_error) => otp_error_response(&otp_error),
    }
}
