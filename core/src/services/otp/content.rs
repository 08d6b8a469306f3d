//! Rendered email content for each OTP purpose

use crate::domain::entities::otp_challenge::OtpPurpose;

/// One rendered outbound message, plain-text and HTML parts
#[derive(Debug, Clone)]
pub struct MailContent {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Render the subject and bodies for a passcode email
///
/// The code appears verbatim in both parts; everything else is static
/// wording per purpose.
pub fn render_passcode_email(purpose: OtpPurpose, code: &str, expiry_minutes: i64) -> MailContent {
    match purpose {
        OtpPurpose::EmailVerification => MailContent {
            subject: String::from("Verify your JobNest email address"),
            text_body: format!(
                "Your JobNest verification code is {}.\n\n\
                 Enter it within {} minutes to confirm your email address.\n\n\
                 If you did not create a JobNest account, you can ignore this email.",
                code, expiry_minutes
            ),
            html_body: format!(
                "<p>Your JobNest verification code is <strong>{}</strong>.</p>\
                 <p>Enter it within {} minutes to confirm your email address.</p>\
                 <p>If you did not create a JobNest account, you can ignore this email.</p>",
                code, expiry_minutes
            ),
        },
        OtpPurpose::PasswordReset => MailContent {
            subject: String::from("Reset your JobNest password"),
            text_body: format!(
                "Your JobNest password reset code is {}.\n\n\
                 Enter it within {} minutes to choose a new password.\n\n\
                 If you did not request a reset, ignore this email and your \
                 password will stay unchanged.",
                code, expiry_minutes
            ),
            html_body: format!(
                "<p>Your JobNest password reset code is <strong>{}</strong>.</p>\
                 <p>Enter it within {} minutes to choose a new password.</p>\
                 <p>If you did not request a reset, ignore this email and your \
                 password will stay unchanged.</p>",
                code, expiry_minutes
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_appears_in_both_parts() {
        let content = render_passcode_email(OtpPurpose::EmailVerification, "483920", 5);
        assert!(content.text_body.contains("483920"));
        assert!(content.html_body.contains("483920"));
        assert!(!content.subject.contains("483920"));
    }

    #[test]
    fn test_subjects_differ_by_purpose() {
        let verify = render_passcode_email(OtpPurpose::EmailVerification, "111111", 5);
        let reset = render_passcode_email(OtpPurpose::PasswordReset, "111111", 5);
        assert_ne!(verify.subject, reset.subject);
        assert!(verify.subject.contains("Verify"));
        assert!(reset.subject.contains("Reset"));
    }

    #[test]
    fn test_expiry_window_is_stated() {
        let content = render_passcode_email(OtpPurpose::PasswordReset, "222222", 10);
        assert!(content.text_body.contains("10 minutes"));
        assert!(content.html_body.contains("10 minutes"));
    }
}
