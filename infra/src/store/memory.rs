//! In-memory OTP store
//!
//! A per-process table for development and tests. There is no background
//! timer, so expired records are swept on every `get` and `put`. State is
//! lost on restart, which makes this backend unsuitable for durable
//! deployments or for running multiple processes.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use jn_core::domain::entities::otp_challenge::{OtpChallenge, OtpPurpose};
use jn_core::services::OtpStore;

type Table = HashMap<(String, OtpPurpose), OtpChallenge>;

/// OTP store held in process memory
#[derive(Default)]
pub struct MemoryOtpStore {
    records: Mutex<Table>,
}

impl MemoryOtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop expired records from the locked table
    fn sweep_table(records: &mut Table) -> usize {
        let before = records.len();
        records.retain(|_, challenge| !challenge.is_expired());
        before - records.len()
    }
}

#[async_trait]
impl OtpStore for MemoryOtpStore {
    async fn get(&self, email: &str, purpose: OtpPurpose) -> Result<Option<OtpChallenge>, String> {
        let mut records = self.records.lock().await;
        Self::sweep_table(&mut records);
        Ok(records.get(&(email.to_string(), purpose)).cloned())
    }

    async fn put(&self, challenge: &OtpChallenge) -> Result<(), String> {
        let mut records = self.records.lock().await;
        Self::sweep_table(&mut records);
        records.insert(
            (challenge.email.clone(), challenge.purpose),
            challenge.clone(),
        );
        Ok(())
    }

    async fn delete(&self, email: &str, purpose: OtpPurpose) -> Result<(), String> {
        let mut records = self.records.lock().await;
        records.remove(&(email.to_string(), purpose));
        Ok(())
    }

    async fn increment_attempts(&self, email: &str, purpose: OtpPurpose) -> Result<u32, String> {
        let mut records = self.records.lock().await;
        match records.get_mut(&(email.to_string(), purpose)) {
            Some(challenge) => {
                challenge.attempts += 1;
                Ok(challenge.attempts)
            }
            // Mirrors a counter primitive creating itself at 1
            None => Ok(1),
        }
    }

    async fn sweep(&self) -> Result<usize, String> {
        let mut records = self.records.lock().await;
        Ok(Self::sweep_table(&mut records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn challenge(email: &str, purpose: OtpPurpose) -> OtpChallenge {
        OtpChallenge::new(email.to_string(), purpose)
    }

    fn expired(email: &str, purpose: OtpPurpose) -> OtpChallenge {
        let mut challenge = challenge(email, purpose);
        challenge.created_at = Utc::now() - Duration::minutes(10);
        challenge.expires_at = Utc::now() - Duration::minutes(5);
        challenge
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let store = MemoryOtpStore::new();
        let stored = challenge("user@example.com", OtpPurpose::EmailVerification);

        store.put(&stored).await.unwrap();
        let loaded = store
            .get("user@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap()
            .expect("record should be present");

        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn test_get_sweeps_expired_records() {
        let store = MemoryOtpStore::new();
        store
            .put(&expired("user@example.com", OtpPurpose::EmailVerification))
            .await
            .unwrap();

        let loaded = store
            .get("user@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap();
        assert!(loaded.is_none());

        // Already swept by the get above
        assert_eq!(store.sweep().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_purposes_do_not_collide() {
        let store = MemoryOtpStore::new();
        store
            .put(&challenge("user@example.com", OtpPurpose::EmailVerification))
            .await
            .unwrap();
        store
            .put(&challenge("user@example.com", OtpPurpose::PasswordReset))
            .await
            .unwrap();

        assert!(store
            .get("user@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap()
            .is_some());
        assert!(store
            .get("user@example.com", OtpPurpose::PasswordReset)
            .await
            .unwrap()
            .is_some());

        store
            .delete("user@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap();
        assert!(store
            .get("user@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .get("user@example.com", OtpPurpose::PasswordReset)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_increment_attempts_counts_up() {
        let store = MemoryOtpStore::new();
        store
            .put(&challenge("user@example.com", OtpPurpose::EmailVerification))
            .await
            .unwrap();

        assert_eq!(
            store
                .increment_attempts("user@example.com", OtpPurpose::EmailVerification)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .increment_attempts("user@example.com", OtpPurpose::EmailVerification)
                .await
                .unwrap(),
            2
        );

        let loaded = store
            .get("user@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.attempts, 2);
    }

    #[tokio::test]
    async fn test_sweep_reports_removed_count() {
        let store = MemoryOtpStore::new();
        store
            .put(&challenge("live@example.com", OtpPurpose::EmailVerification))
            .await
            .unwrap();
        // Inserted after the live record so no later put sweeps it first
        store
            .put(&expired("stale@example.com", OtpPurpose::EmailVerification))
            .await
            .unwrap();

        assert_eq!(store.sweep().await.unwrap(), 1);
        assert!(store
            .get("live@example.com", OtpPurpose::EmailVerification)
            .await
            .unwrap()
            .is_some());
    }
}
