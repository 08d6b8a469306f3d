use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use jn_api::app::create_app;
use jn_api::routes::otp::AppState;
use jn_core::services::{OtpService, OtpServiceConfig};
use jn_infra::{create_mailer, create_store};
use jn_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize structured logging, honoring RUST_LOG when set
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting JobNest OTP API server");

    // Load configuration, refusing to start with an unusable setup
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Wire up the storage backend and mail transport
    let store = match create_store(&config.store).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize OTP store: {}", e);
            std::process::exit(1);
        }
    };

    let mailer = match create_mailer(&config.mail) {
        Ok(mailer) => mailer,
        Err(e) => {
            error!("Failed to initialize mail transport: {}", e);
            std::process::exit(1);
        }
    };

    let otp_service = Arc::new(OtpService::new(
        store,
        mailer,
        OtpServiceConfig {
            expiry_minutes: config.otp.expiry_minutes,
            max_attempts: config.otp.max_attempts,
        },
    ));

    let app_state = web::Data::new(AppState { otp_service });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
