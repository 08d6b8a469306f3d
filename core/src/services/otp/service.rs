//! Main OTP service implementation

use std::sync::Arc;

use jn_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::otp_challenge::{OtpChallenge, OtpPurpose, CODE_LENGTH};
use crate::errors::{OtpError, OtpResult};

use super::config::OtpServiceConfig;
use super::content::render_passcode_email;
use super::traits::{Mailer, OtpStore};
use super::types::IssueReceipt;

/// OTP service orchestrating issuance and verification
///
/// Generic over the storage and delivery ports so deployments can pick any
/// backend combination; the HTTP layer instantiates it over trait objects.
pub struct OtpService<S, M>
where
    S: OtpStore + ?Sized,
    M: Mailer + ?Sized,
{
    /// Storage backend holding outstanding challenges
    store: Arc<S>,
    /// Outbound mail collaborator
    mailer: Arc<M>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<S, M> OtpService<S, M>
where
    S: OtpStore + ?Sized,
    M: Mailer + ?Sized,
{
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Storage backend implementation
    /// * `mailer` - Mail delivery implementation
    /// * `config` - Service configuration
    pub fn new(store: Arc<S>, mailer: Arc<M>, config: OtpServiceConfig) -> Self {
        Self {
            store,
            mailer,
            config,
        }
    }

    /// Issue a passcode to an email address
    ///
    /// This method:
    /// 1. Validates and normalizes the address
    /// 2. Refuses with `RateLimited` while a live code is outstanding
    /// 3. Generates and persists a fresh challenge
    /// 4. Renders and sends the purpose-specific email
    ///
    /// A delivery failure rolls the just-persisted record back so a
    /// transient mail error cannot lock the address out of re-issuance.
    ///
    /// # Arguments
    ///
    /// * `email` - The address to send the code to
    /// * `purpose` - Which workflow the code is for
    ///
    /// # Returns
    ///
    /// * `Ok(IssueReceipt)` - The normalized address and expiry of the new challenge
    /// * `Err(OtpError)` - Validation, rate-limit, storage, or delivery failure
    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> OtpResult<IssueReceipt> {
        if !is_valid_email(email) {
            return Err(OtpError::InvalidEmail {
                email: email.trim().to_string(),
            });
        }
        let email = normalize_email(email);

        // Refuse to reissue while an unexpired, unexhausted code is out
        if let Some(existing) = self
            .store
            .get(&email, purpose)
            .await
            .map_err(|e| self.storage_error("load challenge", &email, e))?
        {
            if existing.is_live(self.config.max_attempts) {
                let retry_after_seconds = existing.time_until_expiry().num_seconds().max(0) as u64;
                tracing::warn!(
                    email = %mask_email(&email),
                    purpose = %purpose,
                    retry_after_seconds = retry_after_seconds,
                    event = "otp_rate_limited",
                    "Refusing to reissue while a code is outstanding"
                );
                return Err(OtpError::RateLimited {
                    retry_after_seconds,
                });
            }

            // Dead record (expired or exhausted): clear it and start fresh
            self.store
                .delete(&email, purpose)
                .await
                .map_err(|e| self.storage_error("clear stale challenge", &email, e))?;
        }

        let challenge =
            OtpChallenge::new_with_expiry(email.clone(), purpose, self.config.expiry_minutes);
        tracing::info!(
            email = %mask_email(&email),
            purpose = %purpose,
            challenge_id = %challenge.id,
            event = "otp_generated",
            "Generated new passcode"
        );

        self.store.put(&challenge).await.map_err(|e| {
            tracing::error!(
                email = %mask_email(&email),
                purpose = %purpose,
                error = %e,
                event = "otp_storage_failed",
                "Failed to persist passcode"
            );
            OtpError::Storage {
                message: format!("Failed to store passcode: {}", e),
            }
        })?;

        let content = render_passcode_email(purpose, &challenge.code, self.config.expiry_minutes);
        if let Err(e) = self
            .mailer
            .send(
                &email,
                &content.subject,
                &content.text_body,
                &content.html_body,
            )
            .await
        {
            tracing::error!(
                email = %mask_email(&email),
                purpose = %purpose,
                error = %e,
                event = "otp_delivery_failed",
                "Failed to deliver passcode email, rolling the record back"
            );
            // Best effort: a failed rollback only means the user waits out
            // the expiry window instead of retrying immediately
            if let Err(rollback) = self.store.delete(&email, purpose).await {
                tracing::warn!(
                    email = %mask_email(&email),
                    error = %rollback,
                    event = "otp_rollback_failed",
                    "Could not roll back undelivered passcode"
                );
            }
            return Err(OtpError::Delivery { message: e });
        }

        tracing::info!(
            email = %mask_email(&email),
            purpose = %purpose,
            challenge_id = %challenge.id,
            event = "otp_issued",
            "Passcode stored and delivered"
        );

        Ok(IssueReceipt {
            email,
            purpose,
            expires_at: challenge.expires_at,
        })
    }

    /// Verify a candidate code and consume the challenge on success
    ///
    /// The single-phase flow used for email verification: a matching code
    /// deletes the record immediately, so a repeat call reports `NotFound`.
    ///
    /// # Arguments
    ///
    /// * `email` - The address the code was sent to
    /// * `code` - The candidate code supplied by the user
    /// * `purpose` - Which workflow the code is for
    pub async fn verify(&self, email: &str, code: &str, purpose: OtpPurpose) -> OtpResult<()> {
        self.verify_with(email, code, purpose, true).await
    }

    /// Verify a candidate code without consuming the challenge
    ///
    /// First half of the two-phase flow used for password reset: a matching
    /// code leaves the record in place so the dependent change (the actual
    /// password update) can run, after which [`consume`](Self::consume)
    /// clears it. Failed checks mutate state exactly as `verify` does.
    pub async fn check(&self, email: &str, code: &str, purpose: OtpPurpose) -> OtpResult<()> {
        self.verify_with(email, code, purpose, false).await
    }

    /// Remove a previously checked challenge once its dependent change has
    /// been committed
    pub async fn consume(&self, email: &str, purpose: OtpPurpose) -> OtpResult<()> {
        let email = normalize_email(email);
        self.store
            .delete(&email, purpose)
            .await
            .map_err(|e| self.storage_error("consume challenge", &email, e))?;

        tracing::info!(
            email = %mask_email(&email),
            purpose = %purpose,
            event = "otp_consumed",
            "Verified challenge consumed"
        );
        Ok(())
    }

    /// Shared verification state machine
    ///
    /// Walks the record through absent / exhausted / expired / mismatch /
    /// match, mutating storage as each outcome requires.
    async fn verify_with(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
        consume_on_match: bool,
    ) -> OtpResult<()> {
        // Shape check before any storage access
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpError::InvalidCode);
        }
        let email = normalize_email(email);

        let challenge = match self
            .store
            .get(&email, purpose)
            .await
            .map_err(|e| self.storage_error("load challenge", &email, e))?
        {
            Some(challenge) => challenge,
            None => {
                tracing::info!(
                    email = %mask_email(&email),
                    purpose = %purpose,
                    event = "otp_not_found",
                    "No outstanding passcode for this address"
                );
                return Err(OtpError::NotFound);
            }
        };

        // Stale guard: a record that already spent its budget should have
        // been deleted when the last attempt was counted
        if challenge.attempts >= self.config.max_attempts {
            self.store
                .delete(&email, purpose)
                .await
                .map_err(|e| self.storage_error("purge exhausted challenge", &email, e))?;
            return Err(OtpError::TooManyAttempts);
        }

        if challenge.is_expired() {
            self.store
                .delete(&email, purpose)
                .await
                .map_err(|e| self.storage_error("purge expired challenge", &email, e))?;
            tracing::info!(
                email = %mask_email(&email),
                purpose = %purpose,
                event = "otp_expired",
                "Passcode expired before verification"
            );
            return Err(OtpError::Expired);
        }

        if challenge.code != code {
            let attempts = self
                .store
                .increment_attempts(&email, purpose)
                .await
                .map_err(|e| self.storage_error("count failed attempt", &email, e))?;

            if attempts >= self.config.max_attempts {
                self.store
                    .delete(&email, purpose)
                    .await
                    .map_err(|e| self.storage_error("purge exhausted challenge", &email, e))?;
                tracing::warn!(
                    email = %mask_email(&email),
                    purpose = %purpose,
                    event = "otp_attempts_exhausted",
                    "Attempt budget exhausted, challenge purged"
                );
                return Err(OtpError::TooManyAttempts);
            }

            let remaining_attempts = self.config.max_attempts - attempts;
            tracing::warn!(
                email = %mask_email(&email),
                purpose = %purpose,
                remaining_attempts = remaining_attempts,
                event = "otp_mismatch",
                "Wrong passcode supplied"
            );
            return Err(OtpError::Mismatch { remaining_attempts });
        }

        if consume_on_match {
            self.store
                .delete(&email, purpose)
                .await
                .map_err(|e| self.storage_error("consume challenge", &email, e))?;
        }

        tracing::info!(
            email = %mask_email(&email),
            purpose = %purpose,
            consumed = consume_on_match,
            event = "otp_verified",
            "Passcode verified"
        );
        Ok(())
    }

    fn storage_error(&self, action: &str, email: &str, error: String) -> OtpError {
        tracing::error!(
            email = %mask_email(email),
            error = %error,
            event = "otp_storage_failed",
            "Storage backend refused to {}", action
        );
        OtpError::Storage {
            message: format!("Failed to {}: {}", action, error),
        }
    }
}
