use actix_web::{web, HttpResponse};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::{IssueOtpRequest, OtpResponse};
use crate::handlers::otp_error_response;
use crate::routes::otp::AppState;

use jn_core::domain::entities::otp_challenge::OtpPurpose;
use jn_core::errors::OtpError;
use jn_core::services::{Mailer, OtpStore};
use jn_shared::utils::mask_email;

/// Handler for POST /api/v1/otp/issue
///
/// Issues a one-time passcode and emails it to the given address.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "purpose": "email-verification"
/// }
/// ```
///
/// # Responses
///
/// * `200` - Code generated and handed to the mail transport
/// * `400` - Malformed email or unknown purpose
/// * `429` - A live code is already outstanding, body carries `retryAfterSeconds`
/// * `503` - Mail delivery failed
/// * `500` - Storage backend failed
pub async fn issue<S, M>(
    state: web::Data<AppState<S, M>>,
    request: web::Json<IssueOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + ?Sized + 'static,
    M: Mailer + ?Sized + 'static,
{
    if let Err(validation_errors) = request.0.validate() {
        warn!(
            email = %mask_email(&request.email),
            errors = %validation_errors,
            "Rejected malformed issue request"
        );
        return HttpResponse::BadRequest().json(OtpResponse::error(
            "Please provide a valid email address",
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
        "Processing passcode issue request"
    );

    match state.otp_service.issue(&request.email, purpose).await {
        Ok(receipt) => {
            info!(
                email = %mask_email(&receipt.email),
                purpose = %receipt.purpose,
                expires_at = %receipt.expires_at,
                "Passcode issued"
            );
            HttpResponse::Ok().json(OtpResponse::ok(
                "A verification code has been sent to your email address",
            ))
        }
        Err(otp_error) => otp_error_response(&otp_error),
    }
}
