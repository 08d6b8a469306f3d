//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address shape check; deliverability is proven by the OTP
// round-trip itself, not by the regex.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an email address for storage and lookup (trim, lower-case)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check whether an address is syntactically valid after normalization
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(&normalize_email(email))
}

/// Mask an email address for log output (e.g. j***@example.com)
pub fn mask_email(email: &str) -> String {
    let normalized = normalize_email(email);
    match normalized.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = &local[..local.chars().next().map_or(0, |c| c.len_utf8())];
            format!("{}***@{}", first, domain)
        }
        Some((_, domain)) => format!("***@{}", domain),
        None => String::from("***"),
    }
}
