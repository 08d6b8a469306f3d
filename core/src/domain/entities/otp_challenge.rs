//! OTP challenge entity for email-based verification.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for passcodes (5 minutes)
pub const DEFAULT_EXPIRY_MINUTES: i64 = 5;

/// Which workflow an outstanding passcode belongs to
///
/// Uniqueness and delivery content are both scoped by purpose: an address
/// may hold one live challenge per purpose at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtpPurpose {
    /// Proving control of an address before account activation
    EmailVerification,
    /// Proving control of an address before a password change
    PasswordReset,
}

impl OtpPurpose {
    /// Wire and storage-key representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::EmailVerification => "email-verification",
            OtpPurpose::PasswordReset => "password-reset",
        }
    }
}

impl std::fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email-verification" => Ok(OtpPurpose::EmailVerification),
            "password-reset" => Ok(OtpPurpose::PasswordReset),
            _ => Err(format!("Unknown OTP purpose: {}", s)),
        }
    }
}

/// One outstanding passcode challenge for one email address
///
/// A challenge is created at issuance, has its `attempts` counter bumped on
/// every failed verification, and is deleted on success, exhaustion, or
/// expiry. Nothing ever reads the code back out except the verification
/// comparison itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Unique identifier, used for log correlation only
    pub id: Uuid,

    /// Normalized (trimmed, lower-cased) email address
    pub email: String,

    /// Workflow this challenge belongs to
    pub purpose: OtpPurpose,

    /// The 6-digit passcode
    pub code: String,

    /// Number of failed verification attempts so far
    pub attempts: u32,

    /// Timestamp when the challenge was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the challenge expires
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Creates a new challenge with the default 5-minute lifetime
    ///
    /// The caller is expected to pass an already-normalized address.
    pub fn new(email: String, purpose: OtpPurpose) -> Self {
        Self::new_with_expiry(email, purpose, DEFAULT_EXPIRY_MINUTES)
    }

    /// Creates a new challenge with a custom lifetime in minutes
    pub fn new_with_expiry(email: String, purpose: OtpPurpose, expiry_minutes: i64) -> Self {
        let code = Self::generate_code();
        let now = Utc::now();
        let expires_at = now + Duration::minutes(expiry_minutes);

        Self {
            id: Uuid::new_v4(),
            email,
            purpose,
            code,
            attempts: 0,
            created_at: now,
            expires_at,
        }
    }

    /// Generates a random 6-digit passcode, uniformly distributed over
    /// `000000`-`999999`
    ///
    /// The generator does not need to be cryptographically secure for this
    /// use: codes expire within minutes and allow three guesses.
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Checks if the challenge has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the challenge can still be matched against
    ///
    /// A challenge is live while it is unexpired and has attempts left in
    /// its budget.
    pub fn is_live(&self, max_attempts: u32) -> bool {
        !self.is_expired() && self.attempts < max_attempts
    }

    /// Gets the number of verification attempts left (0 once exhausted)
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Gets the time remaining until expiration, or zero if already expired
    pub fn time_until_expiry(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration as StdDuration;

    #[test]
    fn test_new_challenge() {
        let email = "user@example.com".to_string();
        let challenge = OtpChallenge::new(email.clone(), OtpPurpose::EmailVerification);

        assert_eq!(challenge.email, email);
        assert_eq!(challenge.purpose, OtpPurpose::EmailVerification);
        assert_eq!(challenge.code.len(), CODE_LENGTH);
        assert_eq!(challenge.attempts, 0);
        assert!(!challenge.is_expired());
        assert!(challenge.is_live(MAX_ATTEMPTS));
    }

    #[test]
    fn test_generate_code_format() {
        // Test multiple times to ensure consistency
        for _ in 0..100 {
            let code = OtpChallenge::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            // Verify it's a valid number in range
            let num: u32 = code.parse().expect("Generated code should be a valid number");
            assert!(num < 1_000_000);
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: Vec<String> = (0..100).map(|_| OtpChallenge::generate_code()).collect();

        // There should be at least some unique codes (extremely unlikely to get all same)
        let unique_count = codes.iter().collect::<std::collections::HashSet<_>>().len();
        assert!(unique_count > 1);
    }

    #[test]
    fn test_leading_zero_frequency() {
        // Leading-zero codes must show up at roughly 1/10 frequency,
        // proving codes are zero-padded strings rather than truncated
        // integers.
        let leading_zeros = (0..10_000)
            .map(|_| OtpChallenge::generate_code())
            .filter(|code| code.starts_with('0'))
            .count();

        assert!(
            (700..1300).contains(&leading_zeros),
            "leading-zero count {} outside expected band",
            leading_zeros
        );
    }

    #[test]
    fn test_custom_expiry() {
        let challenge = OtpChallenge::new_with_expiry(
            "user@example.com".to_string(),
            OtpPurpose::PasswordReset,
            10,
        );

        let expected = challenge.created_at + Duration::minutes(10);
        assert_eq!(challenge.expires_at, expected);
    }

    #[test]
    fn test_is_expired() {
        // Create a challenge that expires immediately (0 minutes)
        let challenge = OtpChallenge::new_with_expiry(
            "user@example.com".to_string(),
            OtpPurpose::EmailVerification,
            0,
        );

        thread::sleep(StdDuration::from_millis(10));

        assert!(challenge.is_expired());
        assert!(!challenge.is_live(MAX_ATTEMPTS));
    }

    #[test]
    fn test_exhausted_challenge_is_not_live() {
        let mut challenge =
            OtpChallenge::new("user@example.com".to_string(), OtpPurpose::EmailVerification);
        challenge.attempts = MAX_ATTEMPTS;

        assert!(!challenge.is_expired());
        assert!(!challenge.is_live(MAX_ATTEMPTS));
        assert_eq!(challenge.remaining_attempts(MAX_ATTEMPTS), 0);
    }

    #[test]
    fn test_remaining_attempts() {
        let mut challenge =
            OtpChallenge::new("user@example.com".to_string(), OtpPurpose::EmailVerification);

        assert_eq!(challenge.remaining_attempts(MAX_ATTEMPTS), MAX_ATTEMPTS);

        challenge.attempts = 1;
        assert_eq!(challenge.remaining_attempts(MAX_ATTEMPTS), 2);

        challenge.attempts = 5;
        assert_eq!(challenge.remaining_attempts(MAX_ATTEMPTS), 0);
    }

    #[test]
    fn test_time_until_expiry() {
        let challenge =
            OtpChallenge::new("user@example.com".to_string(), OtpPurpose::EmailVerification);

        let remaining = challenge.time_until_expiry();
        assert!(remaining <= Duration::minutes(DEFAULT_EXPIRY_MINUTES));
        assert!(remaining > Duration::minutes(DEFAULT_EXPIRY_MINUTES - 1));
    }

    #[test]
    fn test_purpose_round_trip() {
        assert_eq!(
            "email-verification".parse::<OtpPurpose>().unwrap(),
            OtpPurpose::EmailVerification
        );
        assert_eq!(
            "password-reset".parse::<OtpPurpose>().unwrap(),
            OtpPurpose::PasswordReset
        );
        assert!("signup".parse::<OtpPurpose>().is_err());

        assert_eq!(OtpPurpose::EmailVerification.to_string(), "email-verification");
        assert_eq!(OtpPurpose::PasswordReset.to_string(), "password-reset");
    }

    #[test]
    fn test_serialization() {
        let challenge =
            OtpChallenge::new("user@example.com".to_string(), OtpPurpose::PasswordReset);

        let json = serde_json::to_string(&challenge).unwrap();
        assert!(json.contains("\"password-reset\""));

        let deserialized: OtpChallenge = serde_json::from_str(&json).unwrap();
        assert_eq!(challenge, deserialized);
    }
}
