//! SMTP mail transport
//!
//! Sends rendered messages through an authenticated SMTP relay using
//! lettre's async transport. Each message carries a plain-text and an HTML
//! alternative part.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use jn_core::services::Mailer;
use jn_shared::config::SmtpConfig;
use jn_shared::utils::mask_email;

use crate::InfraError;

/// Mail transport backed by an SMTP relay
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport from validated SMTP settings
    ///
    /// No connection is made here; the relay is first contacted when a
    /// message is sent.
    pub fn new(config: &SmtpConfig) -> Result<Self, InfraError> {
        let from: Mailbox = config.from_address.parse()?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        // Port 465 speaks TLS from the first byte, everything else STARTTLS
        let builder = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self { transport, from })
    }

    async fn deliver(
        &self,
        recipient: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), InfraError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient.parse()?)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text_body.to_string(),
                html_body.to_string(),
            ))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), String> {
        match self.deliver(recipient, subject, text_body, html_body).await {
            Ok(()) => {
                info!(
                    target: "mailer",
                    provider = "smtp",
                    recipient = %mask_email(recipient),
                    subject = %subject,
                    "Mail delivered"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    target: "mailer",
                    provider = "smtp",
                    recipient = %mask_email(recipient),
                    error = %e,
                    "Mail delivery failed"
                );
                Err(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer@example.com".to_string(),
            password: "secret".to_string(),
            from_address: "JobNest <no-reply@example.com>".to_string(),
        }
    }

    #[test]
    fn test_builds_transport_from_valid_config() {
        assert!(SmtpMailer::new(&config()).is_ok());
    }

    #[test]
    fn test_rejects_malformed_from_address() {
        let mut bad = config();
        bad.from_address = "not an address".to_string();

        match SmtpMailer::new(&bad) {
            Err(InfraError::Address(_)) => {}
            other => panic!("Expected Address error, got {:?}", other.map(|_| ())),
        }
    }
}
