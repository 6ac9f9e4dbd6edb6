use std::env;

use lettre::message::Mailbox;
use url::Url;

use crate::errors::PollError;

pub const DEFAULT_STRAWPOLL_API_URL: &str = "https://api.strawpoll.com/v3/polls";
pub const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Which Monday the poll window opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekStart {
    Current,
    Next,
}

/// Fixed per-deployment poll constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub week_start: WeekStart,
    pub min_choices: u32,
    /// `None` serializes as `null`, which the polling service reads as unlimited.
    pub max_choices: Option<u32>,
    pub require_voter_names: Option<bool>,
}

impl PollSettings {
    /// WhatsApp deployment: this week's days, at most two picks.
    pub const CHAT: Self = Self {
        week_start: WeekStart::Current,
        min_choices: 1,
        max_choices: Some(2),
        require_voter_names: None,
    };

    /// Email deployment: next week's days, unlimited picks.
    pub const EMAIL: Self = Self {
        week_start: WeekStart::Next,
        min_choices: 1,
        max_choices: None,
        require_voter_names: None,
    };

    /// Email plus pull-request deployment.
    pub const PUBLISH: Self = Self {
        week_start: WeekStart::Next,
        min_choices: 1,
        max_choices: Some(10),
        require_voter_names: Some(true),
    };

    #[must_use]
    pub fn for_stages(notify: NotifyVia, publish: bool) -> Self {
        match (notify, publish) {
            (_, true) => Self::PUBLISH,
            (NotifyVia::WhatsApp, false) => Self::CHAT,
            (NotifyVia::Email | NotifyVia::None, false) => Self::EMAIL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyVia {
    None,
    WhatsApp,
    Email,
}

impl NotifyVia {
    fn parse(raw: &str) -> Result<Self, PollError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(NotifyVia::None),
            "whatsapp" | "chat" => Ok(NotifyVia::WhatsApp),
            "email" => Ok(NotifyVia::Email),
            other => Err(PollError::invalid(
                "NOTIFY_VIA",
                format!("expected none, whatsapp or email, got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub api_url: String,
    pub account_sid: String,
    pub auth_token: String,
    pub sender_number: String,
    pub recipient_number: String,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from: Mailbox,
    pub to: Mailbox,
}

#[derive(Debug, Clone)]
pub enum NotifyConfig {
    None,
    WhatsApp(WhatsAppConfig),
    Email(EmailConfig),
}

impl NotifyConfig {
    #[must_use]
    pub fn channel(&self) -> NotifyVia {
        match self {
            NotifyConfig::None => NotifyVia::None,
            NotifyConfig::WhatsApp(_) => NotifyVia::WhatsApp,
            NotifyConfig::Email(_) => NotifyVia::Email,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub base_branch: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub strawpoll_api_key: String,
    pub strawpoll_api_url: String,
    pub notify: NotifyConfig,
    pub publish: Option<GitHubConfig>,
    pub poll: PollSettings,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` for the first absent required key, or
    /// `ConfigInvalid` for a value that cannot be parsed.
    pub fn from_env() -> Result<Self, PollError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Empty values count
    /// as missing.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PollError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| PollError::ConfigMissing(key.to_string()));
        let url_or = |key: &str, default: &str| -> Result<String, PollError> {
            let raw = get(key).unwrap_or_else(|| default.to_string());
            Url::parse(&raw).map_err(|e| PollError::invalid(key, e.to_string()))?;
            Ok(raw.trim_end_matches('/').to_string())
        };

        let strawpoll_api_key = require("STRAWPOLL_API_KEY")?;
        let strawpoll_api_url = url_or("STRAWPOLL_API_URL", DEFAULT_STRAWPOLL_API_URL)?;

        let notify_via = match get("NOTIFY_VIA") {
            Some(raw) => NotifyVia::parse(&raw)?,
            None => NotifyVia::Email,
        };

        let notify = match notify_via {
            NotifyVia::None => NotifyConfig::None,
            NotifyVia::WhatsApp => NotifyConfig::WhatsApp(WhatsAppConfig {
                account_sid: require("TWILIO_ACCOUNT_SID")?,
                auth_token: require("TWILIO_AUTH_TOKEN")?,
                sender_number: require("TWILIO_WHATSAPP_NUMBER")?,
                recipient_number: require("RECIPIENT_WHATSAPP_NUMBER")?,
                api_url: url_or("TWILIO_API_URL", DEFAULT_TWILIO_API_URL)?,
            }),
            NotifyVia::Email => {
                let smtp_host = require("SMTP_HOST")?;
                let smtp_username = require("SMTP_USERNAME")?;
                let smtp_password = require("SMTP_PASSWORD")?;
                let to_email = require("RECIPIENT_EMAIL")?;
                let smtp_port = match get("SMTP_PORT") {
                    Some(raw) => raw
                        .trim()
                        .parse::<u16>()
                        .map_err(|e| PollError::invalid("SMTP_PORT", e.to_string()))?,
                    None => DEFAULT_SMTP_PORT,
                };
                let from = get("EMAIL_FROM")
                    .unwrap_or_else(|| smtp_username.clone())
                    .parse::<Mailbox>()
                    .map_err(|e| PollError::invalid("EMAIL_FROM", e.to_string()))?;
                let to = to_email
                    .parse::<Mailbox>()
                    .map_err(|e| PollError::invalid("RECIPIENT_EMAIL", e.to_string()))?;
                NotifyConfig::Email(EmailConfig {
                    smtp_host,
                    smtp_port,
                    smtp_username,
                    smtp_password,
                    from,
                    to,
                })
            }
        };

        let publish_enabled = match get("PUBLISH_RECORD")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("on" | "true" | "1") => true,
            Some("off" | "false" | "0") => false,
            Some(other) => {
                return Err(PollError::invalid(
                    "PUBLISH_RECORD",
                    format!("expected on or off, got '{other}'"),
                ));
            }
        };

        let publish = if publish_enabled {
            Some(GitHubConfig {
                token: require("GITHUB_TOKEN")?,
                owner: require("GITHUB_REPO_OWNER")?,
                repo: require("GITHUB_REPO_NAME")?,
                base_branch: get("GITHUB_BASE_BRANCH")
                    .unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string()),
                api_url: url_or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL)?,
            })
        } else {
            None
        };

        Ok(Self {
            strawpoll_api_key,
            strawpoll_api_url,
            poll: PollSettings::for_stages(notify_via, publish.is_some()),
            notify,
            publish,
        })
    }
}
