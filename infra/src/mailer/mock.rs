//! Mock Mail Transport
//!
//! A mock implementation of the mail transport for development and testing.
//! Messages are printed to the console and collected in an in-memory outbox
//! instead of being sent anywhere.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use jn_core::services::Mailer;
use jn_shared::utils::mask_email;

/// One message captured by the mock transport
#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Mock mail transport for development and testing
///
/// This implementation:
/// - Prints messages to the console in development
/// - Collects every message in an inspectable outbox
/// - Tracks message count for testing
#[derive(Clone)]
pub struct MockMailer {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Every message handed to this transport, in order
    outbox: Arc<Mutex<Vec<SentMail>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailer {
    /// Create a new mock transport with console output enabled
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock transport with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(Vec::new())),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Snapshot of every message sent so far
    pub fn outbox(&self) -> Vec<SentMail> {
        self.outbox.lock().unwrap().clone()
    }

    /// The most recent message, if any
    pub fn last_message(&self) -> Option<SentMail> {
        self.outbox.lock().unwrap().last().cloned()
    }

    /// Clear the outbox and reset the counter
    pub fn reset(&self) {
        self.outbox.lock().unwrap().clear();
        self.message_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), String> {
        if self.simulate_failure {
            warn!(
                target: "mailer",
                provider = "mock",
                recipient = %mask_email(recipient),
                "Mock mailer simulating delivery failure"
            );
            return Err("Simulated mail delivery failure".to_string());
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            // Console output for development - show the full message
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAILER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", recipient);
            println!("Subject: {}", subject);
            println!("{}", text_body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mailer",
            provider = "mock",
            recipient = %mask_email(recipient),
            subject = %subject,
            body_length = text_body.len(),
            "Mail delivered (mock)"
        );

        self.outbox.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            text_body: text_body.to_string(),
            html_body: html_body.to_string(),
        });

        Ok(())
    }
}
