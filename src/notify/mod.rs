//! Delivery of the shareable poll link to a single fixed recipient.

pub mod email;
pub mod whatsapp;

use async_trait::async_trait;
use reqwest::Client;

use crate::core::config::NotifyConfig;
use crate::errors::PollError;

pub use email::EmailNotifier;
pub use whatsapp::WhatsAppNotifier;

/// Human-readable message carrying the poll link.
#[must_use]
pub fn notification_body(link: &str) -> String {
    format!("Your poll has been created! Check it out here: {link}")
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short channel name used in logs and the success message.
    fn channel(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns a `Notification` stage error when delivery fails.
    async fn notify(&self, link: &str) -> Result<(), PollError>;
}

/// Builds the notifier selected by configuration, or `None` when the stage is off.
#[must_use]
pub fn notifier_for(config: &NotifyConfig, http: &Client) -> Option<Box<dyn Notifier>> {
    match config {
        NotifyConfig::None => None,
        NotifyConfig::WhatsApp(cfg) => {
            Some(Box::new(WhatsAppNotifier::new(http.clone(), cfg.clone())))
        }
        NotifyConfig::Email(cfg) => Some(Box::new(EmailNotifier::new(cfg.clone()))),
    }
}
