//! Passcode lifetime and attempt budget

use serde::{Deserialize, Serialize};
use std::env;

use super::ConfigError;

const DEFAULT_EXPIRY_MINUTES: i64 = 5;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Tunables for the OTP workflow
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a passcode stays verifiable after issuance
    pub expiry_minutes: i64,

    /// Failed verifications allowed before the record is purged
    pub max_attempts: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OtpConfig {
    /// Load overrides from `OTP_EXPIRY_MINUTES` / `OTP_MAX_ATTEMPTS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let expiry_minutes = parse_or("OTP_EXPIRY_MINUTES", DEFAULT_EXPIRY_MINUTES)?;
        let max_attempts = parse_or("OTP_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        Ok(Self {
            expiry_minutes,
            max_attempts,
        })
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar { var, value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.expiry_minutes, 5);
        assert_eq!(config.max_attempts, 3);
    }
}
