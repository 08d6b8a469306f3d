//! Ports for storage and mail delivery integration

use async_trait::async_trait;

use crate::domain::entities::otp_challenge::{OtpChallenge, OtpPurpose};

/// Port for the OTP storage backend
///
/// Records are keyed by the `(email, purpose)` pair; the email is expected
/// to be normalized by the caller. Implementations report failures as plain
/// strings which the service maps into its error taxonomy.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Load the outstanding challenge for an address and purpose
    async fn get(&self, email: &str, purpose: OtpPurpose) -> Result<Option<OtpChallenge>, String>;

    /// Upsert the outstanding challenge under its `(email, purpose)` pair
    async fn put(&self, challenge: &OtpChallenge) -> Result<(), String>;

    /// Remove the outstanding challenge, if any
    async fn delete(&self, email: &str, purpose: OtpPurpose) -> Result<(), String>;

    /// Atomically bump the failed-attempt counter and return the new count
    ///
    /// Must be a single atomic update, never a read-then-write pair, so
    /// concurrent wrong guesses cannot under-count.
    async fn increment_attempts(&self, email: &str, purpose: OtpPurpose) -> Result<u32, String>;

    /// Remove expired records where the backend cannot expire them itself,
    /// returning how many were dropped
    async fn sweep(&self) -> Result<usize, String>;
}

/// Port for the outbound mail collaborator
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one rendered message to one recipient
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), String>;
}
