use std::fmt;
use thiserror::Error;

/// Pipeline stage that talks to an external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PollSubmission,
    Notification,
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::PollSubmission => "poll submission",
            Stage::Notification => "notification",
            Stage::Publish => "record publish",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("Missing required configuration: {0}")]
    ConfigMissing(String),

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("Failed during {stage}: {message}")]
    UpstreamFailure { stage: Stage, message: String },

    #[error("Malformed response during {stage}: {message}")]
    MalformedResponse { stage: Stage, message: String },
}

impl PollError {
    pub fn upstream(stage: Stage, message: impl Into<String>) -> Self {
        PollError::UpstreamFailure {
            stage,
            message: message.into(),
        }
    }

    pub fn malformed(stage: Stage, message: impl Into<String>) -> Self {
        PollError::MalformedResponse {
            stage,
            message: message.into(),
        }
    }

    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        PollError::ConfigInvalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors raised before any network call was attempted.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            PollError::ConfigMissing(_) | PollError::ConfigInvalid { .. }
        )
    }

    /// The stage that failed, if the error came from an external call.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PollError::UpstreamFailure { stage, .. } | PollError::MalformedResponse { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }
}

impl From<lettre::error::Error> for PollError {
    fn from(error: lettre::error::Error) -> Self {
        PollError::upstream(Stage::Notification, format!("Failed to build email: {error}"))
    }
}

impl From<lettre::transport::smtp::Error> for PollError {
    fn from(error: lettre::transport::smtp::Error) -> Self {
        PollError::upstream(Stage::Notification, format!("SMTP delivery failed: {error}"))
    }
}
