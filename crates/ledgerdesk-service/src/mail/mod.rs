//! Outbound transactional mail.

pub mod http;
pub mod logging;
pub mod templates;

use std::sync::Arc;

use ledgerdesk_core::config::MailConfig;
use ledgerdesk_core::result::AppResult;
use ledgerdesk_core::traits::Mailer;

pub use self::http::HttpMailer;
pub use self::logging::LogMailer;

/// Build the configured mailer: HTTP delivery when enabled, log-only otherwise.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    if config.enabled {
        Ok(Arc::new(HttpMailer::new(config)?))
    } else {
        Ok(Arc::new(LogMailer))
    }
}
