//! OTP storage backend configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use super::ConfigError;

const DEFAULT_FILE_PATH: &str = "./data/otp_store.json";

/// Which storage strategy holds outstanding passcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Redis with native key expiry; the durable choice
    Redis,
    /// In-process table; lost on restart, single process only
    Memory,
    /// JSON file on local disk; single process, low concurrency only
    File,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::File => write!(f, "file"),
        }
    }
}

/// Storage backend selection plus per-backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Selected backend
    pub backend: StoreBackend,

    /// Redis connection URL, required when `backend` is redis
    pub redis_url: Option<String>,

    /// Path of the JSON document used by the file backend
    pub file_path: PathBuf,
}

impl StoreConfig {
    /// Load from `OTP_STORE` / `REDIS_URL` / `OTP_FILE_PATH`.
    ///
    /// The backend defaults to `memory`. Selecting `redis` without a
    /// `REDIS_URL` is a configuration error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match env::var("OTP_STORE") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "OTP_STORE",
                value: raw,
            })?,
            Err(_) => StoreBackend::Memory,
        };

        let redis_url = env::var("REDIS_URL").ok();
        if backend == StoreBackend::Redis && redis_url.is_none() {
            return Err(ConfigError::MissingVar("REDIS_URL"));
        }

        let file_path = env::var("OTP_FILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FILE_PATH));

        Ok(Self {
            backend,
            redis_url,
            file_path,
        })
    }

    /// In-memory backend with no external settings
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            redis_url: None,
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
        }
    }
}
