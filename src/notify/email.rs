//! Email delivery over authenticated SMTP.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Notifier, notification_body};
use crate::core::config::EmailConfig;
use crate::errors::PollError;

pub const EMAIL_SUBJECT: &str = "Weekly Poll Created";

pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    #[must_use]
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// Returns an error if the message cannot be built.
    pub fn compose(&self, link: &str) -> Result<Message, PollError> {
        let message = Message::builder()
            .from(self.config.from.clone())
            .to(self.config.to.clone())
            .subject(EMAIL_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(notification_body(link))?;
        Ok(message)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn channel(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, link: &str) -> Result<(), PollError> {
        let email = self.compose(link)?;

        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );
        let mailer: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build();

        mailer.send(email).await?;

        tracing::info!(subject = EMAIL_SUBJECT, "Email sent successfully");
        Ok(())
    }
}
