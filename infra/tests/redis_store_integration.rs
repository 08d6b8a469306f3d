//! Integration tests for the Redis-backed OTP store
//!
//! These tests need a local Redis instance and are ignored by default:
//! run `cargo test -p jn_infra -- --ignored` with redis://127.0.0.1:6379
//! available.

use uuid::Uuid;

use jn_core::domain::entities::otp_challenge::{OtpChallenge, OtpPurpose};
use jn_core::services::OtpStore;
use jn_infra::store::{RedisClient, RedisOtpStore};

const REDIS_URL: &str = "redis://127.0.0.1:6379";

async fn store() -> RedisOtpStore {
    let client = RedisClient::new(REDIS_URL)
        .await
        .expect("Failed to connect to Redis");
    RedisOtpStore::new(client)
}

fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4())
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_round_trip_and_delete() {
    let store = store().await;
    let email = unique_email();

    let challenge = OtpChallenge::new(email.clone(), OtpPurpose::EmailVerification);
    store.put(&challenge).await.unwrap();

    let loaded = store
        .get(&email, OtpPurpose::EmailVerification)
        .await
        .unwrap()
        .expect("record should be present");
    assert_eq!(loaded.code, challenge.code);
    assert_eq!(loaded.attempts, 0);

    // Purposes use separate keys
    assert!(store
        .get(&email, OtpPurpose::PasswordReset)
        .await
        .unwrap()
        .is_none());

    store.delete(&email, OtpPurpose::EmailVerification).await.unwrap();
    assert!(store
        .get(&email, OtpPurpose::EmailVerification)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_attempt_counter_merges_into_get() {
    let store = store().await;
    let email = unique_email();

    let challenge = OtpChallenge::new(email.clone(), OtpPurpose::EmailVerification);
    store.put(&challenge).await.unwrap();

    assert_eq!(
        store
            .increment_attempts(&email, OtpPurpose::EmailVerification)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        store
            .increment_attempts(&email, OtpPurpose::EmailVerification)
            .await
            .unwrap(),
        2
    );

    let loaded = store
        .get(&email, OtpPurpose::EmailVerification)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.attempts, 2);

    // A new challenge resets the counter
    let replacement = OtpChallenge::new(email.clone(), OtpPurpose::EmailVerification);
    store.put(&replacement).await.unwrap();
    let loaded = store
        .get(&email, OtpPurpose::EmailVerification)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.attempts, 0);

    store.delete(&email, OtpPurpose::EmailVerification).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_expired_challenge_disappears() {
    let store = store().await;
    let email = unique_email();

    // Zero-minute expiry is floored to a one-second TTL
    let challenge = OtpChallenge::new_with_expiry(email.clone(), OtpPurpose::EmailVerification, 0);
    store.put(&challenge).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

    assert!(store
        .get(&email, OtpPurpose::EmailVerification)
        .await
        .unwrap()
        .is_none());
}
