//! Storage backends for OTP challenges
//!
//! This module provides the three interchangeable implementations of the
//! core's `OtpStore` port:
//!
//! - **Redis**: durable store with native TTL expiry and atomic attempt
//!   counters, for multi-process deployments
//! - **Memory**: per-process table, for development and tests
//! - **File**: single JSON document on local disk, for single-process
//!   deployments without a Redis instance

pub mod file;
pub mod memory;
pub mod redis_client;
pub mod redis_store;

pub use file::FileOtpStore;
pub use memory::MemoryOtpStore;
pub use redis_client::RedisClient;
pub use redis_store::RedisOtpStore;

use std::sync::Arc;

use jn_core::services::OtpStore;
use jn_shared::config::{StoreBackend, StoreConfig};

use crate::InfraError;

/// Create an OTP store based on configuration
///
/// Returns the storage backend named by `config.backend`, connecting to
/// Redis or preparing the data directory as needed. Unlike transient
/// per-request failures, a backend that cannot be constructed at startup
/// is a configuration problem and is surfaced as an error rather than
/// silently downgraded.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn OtpStore>, InfraError> {
    match config.backend {
        StoreBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                InfraError::Config("REDIS_URL is required for the redis store".to_string())
            })?;
            let client = RedisClient::new(url).await?;
            tracing::info!(backend = "redis", "OTP store ready");
            Ok(Arc::new(RedisOtpStore::new(client)))
        }
        StoreBackend::Memory => {
            tracing::info!(backend = "memory", "OTP store ready");
            Ok(Arc::new(MemoryOtpStore::new()))
        }
        StoreBackend::File => {
            let store = FileOtpStore::new(config.file_path.clone());
            store.ensure_parent_dir().await?;
            tracing::info!(
                backend = "file",
                path = %config.file_path.display(),
                "OTP store ready"
            );
            Ok(Arc::new(store))
        }
    }
}
