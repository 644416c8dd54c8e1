//! Mailer that only logs messages.

use async_trait::async_trait;
use tracing::info;

use ledgerdesk_core::result::AppResult;
use ledgerdesk_core::traits::{MailMessage, Mailer};

/// Writes each message to the log instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(to = %message.to, subject = %message.subject, "Mail delivery disabled, message logged");
        Ok(())
    }
}
