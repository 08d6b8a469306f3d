//! Application factory
//!
//! This module provides the factory for creating the Actix-web application
//! with all routes and middleware wired up.

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use crate::middleware::cors::create_cors;
use crate::routes::otp::{issue::issue, verify::verify, AppState};

use jn_core::services::{Mailer, OtpStore};

/// Create and configure the application with all dependencies
pub fn create_app<S, M>(
    app_state: web::Data<AppState<S, M>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<tracing_actix_web::StreamSpan<actix_web::body::BoxBody>>,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: OtpStore + ?Sized + 'static,
    M: Mailer + ?Sized + 'static,
{
    // Configure CORS using our custom middleware
    let cors = create_cors();

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware (order matters: CORS first, then request logging)
        .wrap(TracingLogger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // OTP routes
                .service(
                    web::scope("/otp")
                        .route("/issue", web::post().to(issue::<S, M>))
                        .route("/verify", web::post().to(verify::<S, M>)),
                )
                // API documentation endpoint
                .route("/", web::get().to(api_documentation)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "jobnest-otp-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "JobNest OTP API v1",
        "endpoints": {
            "health": "/health",
            "otp": {
                "issue": {
                    "path": "/api/v1/otp/issue",
                    "method": "POST",
                    "description": "Generate a one-time passcode and email it",
                    "request_body": {
                        "email": "string (valid email address)",
                        "purpose": "string ('email-verification' or 'password-reset')"
                    },
                    "responses": {
                        "200": "Code sent successfully",
                        "400": "Invalid email or purpose",
                        "429": "A live code is already outstanding",
                        "503": "Mail delivery unavailable"
                    }
                },
                "verify": {
                    "path": "/api/v1/otp/verify",
                    "method": "POST",
                    "description": "Check a submitted passcode",
                    "request_body": {
                        "email": "string (valid email address)",
                        "code": "string (exactly 6 digits)",
                        "purpose": "string ('email-verification' or 'password-reset')"
                    },
                    "responses": {
                        "200": "Code matched",
                        "400": "Invalid, expired or unknown code"
                    }
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
