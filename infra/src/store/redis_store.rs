//! Redis-backed OTP store
//!
//! Challenges are stored as JSON under a code key with a native TTL, so
//! expired records disappear without an explicit sweep. Failed attempts are
//! tracked in a companion counter key driven by INCR, which keeps the
//! attempt budget accurate when concurrent verification calls race.

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use jn_core::domain::entities::otp_challenge::{OtpChallenge, OtpPurpose};
use jn_core::services::OtpStore;

use super::RedisClient;

/// Redis key prefix for challenge records
const CODE_KEY_PREFIX: &str = "otp:code";

/// Redis key prefix for attempt counters
const ATTEMPTS_KEY_PREFIX: &str = "otp:attempts";

/// OTP store backed by Redis
#[derive(Clone)]
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    /// Create a new store over an established Redis client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Format the key holding the serialized challenge
    fn code_key(email: &str, purpose: OtpPurpose) -> String {
        format!("{}:{}:{}", CODE_KEY_PREFIX, purpose.as_str(), email)
    }

    /// Format the key holding the failed-attempt counter
    fn attempts_key(email: &str, purpose: OtpPurpose) -> String {
        format!("{}:{}:{}", ATTEMPTS_KEY_PREFIX, purpose.as_str(), email)
    }

    /// Seconds until the challenge expires, floored at one so SET EX
    /// never sees a zero lifetime
    fn remaining_ttl_seconds(challenge: &OtpChallenge) -> u64 {
        (challenge.expires_at - Utc::now()).num_seconds().max(1) as u64
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn get(&self, email: &str, purpose: OtpPurpose) -> Result<Option<OtpChallenge>, String> {
        let code_key = Self::code_key(email, purpose);

        let json = match self.client.get(&code_key).await.map_err(|e| e.to_string())? {
            Some(json) => json,
            None => return Ok(None),
        };

        let mut challenge: OtpChallenge = serde_json::from_str(&json)
            .map_err(|e| format!("corrupt challenge record at '{}': {}", code_key, e))?;

        // The live attempt count is kept in its own counter key
        let attempts_key = Self::attempts_key(email, purpose);
        if let Some(raw) = self
            .client
            .get(&attempts_key)
            .await
            .map_err(|e| e.to_string())?
        {
            match raw.parse::<u32>() {
                Ok(count) => challenge.attempts = count,
                Err(_) => warn!(key = %attempts_key, value = %raw, "Ignoring malformed attempt counter"),
            }
        }

        Ok(Some(challenge))
    }

    async fn put(&self, challenge: &OtpChallenge) -> Result<(), String> {
        let code_key = Self::code_key(&challenge.email, challenge.purpose);
        let attempts_key = Self::attempts_key(&challenge.email, challenge.purpose);

        let json = serde_json::to_string(challenge).map_err(|e| e.to_string())?;
        let ttl = Self::remaining_ttl_seconds(challenge);

        self.client
            .set_with_expiry(&code_key, &json, ttl)
            .await
            .map_err(|e| e.to_string())?;

        // A fresh challenge starts from a clean attempt counter
        self.client
            .delete(&[&attempts_key])
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn delete(&self, email: &str, purpose: OtpPurpose) -> Result<(), String> {
        let code_key = Self::code_key(email, purpose);
        let attempts_key = Self::attempts_key(email, purpose);

        self.client
            .delete(&[&code_key, &attempts_key])
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn increment_attempts(&self, email: &str, purpose: OtpPurpose) -> Result<u32, String> {
        let code_key = Self::code_key(email, purpose);
        let attempts_key = Self::attempts_key(email, purpose);

        // The counter must not outlive the challenge it guards
        let ttl = self.client.ttl(&code_key).await.map_err(|e| e.to_string())?;

        let count = self
            .client
            .increment(&attempts_key, ttl.map(|t| t.max(1) as u64))
            .await
            .map_err(|e| e.to_string())?;

        Ok(count.max(0) as u32)
    }

    async fn sweep(&self) -> Result<usize, String> {
        // Redis expires keys natively, nothing to reclaim here
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats_scope_by_purpose() {
        assert_eq!(
            RedisOtpStore::code_key("user@example.com", OtpPurpose::EmailVerification),
            "otp:code:email-verification:user@example.com"
        );
        assert_eq!(
            RedisOtpStore::attempts_key("user@example.com", OtpPurpose::PasswordReset),
            "otp:attempts:password-reset:user@example.com"
        );
    }

    #[test]
    fn test_remaining_ttl_never_zero() {
        let mut challenge = OtpChallenge::new(
            "user@example.com".to_string(),
            OtpPurpose::EmailVerification,
        );
        challenge.expires_at = Utc::now() - chrono::Duration::minutes(1);

        assert_eq!(RedisOtpStore::remaining_ttl_seconds(&challenge), 1);

        challenge.expires_at = Utc::now() + chrono::Duration::minutes(5);
        let ttl = RedisOtpStore::remaining_ttl_seconds(&challenge);
        assert!((295..=300).contains(&ttl));
    }
}
