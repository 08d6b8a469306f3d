//! Outbound mail configuration

use serde::{Deserialize, Serialize};
use std::env;

use super::{ConfigError, Environment};

/// Which delivery implementation sends passcode emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Real delivery over an authenticated SMTP relay
    Smtp,
    /// In-memory mock that logs instead of sending
    Mock,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(MailProvider::Smtp),
            "mock" => Ok(MailProvider::Mock),
            _ => Err(format!("Unknown mail provider: {}", s)),
        }
    }
}

/// SMTP relay settings; every field is required before the server starts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Relay hostname
    pub host: String,

    /// Relay port (587 submission by default)
    pub port: u16,

    /// Authenticating account
    pub username: String,

    /// Account secret
    pub password: String,

    /// From address, e.g. `JobNest <no-reply@jobnest.example>`
    pub from_address: String,
}

impl SmtpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = require("SMTP_HOST")?;
        let port = match env::var("SMTP_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "SMTP_PORT",
                value: raw,
            })?,
            Err(_) => 587,
        };
        let username = require("SMTP_USERNAME")?;
        let password = require("SMTP_PASSWORD")?;
        let from_address = require("MAIL_FROM")?;

        Ok(Self {
            host,
            port,
            username,
            password,
            from_address,
        })
    }
}

/// Outbound mail configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Selected provider
    pub provider: MailProvider,

    /// Transport settings, present when `provider` is smtp
    pub smtp: Option<SmtpConfig>,
}

impl MailConfig {
    /// Load from `MAIL_PROVIDER` plus the `SMTP_*` variables.
    ///
    /// Without an explicit provider, development defaults to the mock and
    /// every other environment to smtp. Transport credentials are resolved
    /// and validated here, before any issuance can run.
    pub fn from_env(environment: Environment) -> Result<Self, ConfigError> {
        let provider = match env::var("MAIL_PROVIDER") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "MAIL_PROVIDER",
                value: raw,
            })?,
            Err(_) if environment.is_development() => MailProvider::Mock,
            Err(_) => MailProvider::Smtp,
        };

        let smtp = match provider {
            MailProvider::Smtp => Some(SmtpConfig::from_env()?),
            MailProvider::Mock => None,
        };

        Ok(Self { provider, smtp })
    }

    /// Mock provider with no transport settings
    pub fn mock() -> Self {
        Self {
            provider: MailProvider::Mock,
            smtp: None,
        }
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("smtp".parse::<MailProvider>().unwrap(), MailProvider::Smtp);
        assert_eq!("MOCK".parse::<MailProvider>().unwrap(), MailProvider::Mock);
        assert!("sendmail".parse::<MailProvider>().is_err());
    }

    #[test]
    fn test_mock_config_has_no_transport() {
        let config = MailConfig::mock();
        assert_eq!(config.provider, MailProvider::Mock);
        assert!(config.smtp.is_none());
    }
}
