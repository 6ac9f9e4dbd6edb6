//! WhatsApp delivery through the Twilio Messages API.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use super::{Notifier, notification_body};
use crate::core::config::WhatsAppConfig;
use crate::errors::{PollError, Stage};

pub struct WhatsAppNotifier {
    http: Client,
    config: WhatsAppConfig,
}

impl WhatsAppNotifier {
    #[must_use]
    pub fn new(http: Client, config: WhatsAppConfig) -> Self {
        Self { http, config }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_url, self.config.account_sid
        )
    }
}

fn whatsapp_address(number: &str) -> String {
    format!("whatsapp:{number}")
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    fn channel(&self) -> &'static str {
        "WhatsApp message"
    }

    async fn notify(&self, link: &str) -> Result<(), PollError> {
        let form = [
            ("From", whatsapp_address(&self.config.sender_number)),
            ("To", whatsapp_address(&self.config.recipient_number)),
            ("Body", notification_body(link)),
        ];

        let resp = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| PollError::upstream(Stage::Notification, e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!(
                "WhatsApp message failed: status={} body={}",
                status, body_text
            );
            return Err(PollError::upstream(
                Stage::Notification,
                format!("messaging service returned {status}"),
            ));
        }

        info!("WhatsApp message sent successfully");
        Ok(())
    }
}
