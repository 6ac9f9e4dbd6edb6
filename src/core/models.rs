use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::PollSettings;

pub const POLL_TITLE: &str = "Weekly Poll";
pub const POLL_TIME_ZONE_NAME: &str = "Europe/Berlin";
pub const INTERMEDIATE_SUFFIX: &str = " (intermediate)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PollOption {
    Text { value: String },
}

impl PollOption {
    pub fn text(value: impl Into<String>) -> Self {
        PollOption::Text {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            PollOption::Text { value } => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    pub is_private: bool,
    pub is_multiple_choice: bool,
    pub multiple_choice_min: u32,
    pub multiple_choice_max: Option<u32>,
    pub results_visibility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_voter_names: Option<bool>,
}

impl From<&PollSettings> for PollConfig {
    fn from(settings: &PollSettings) -> Self {
        Self {
            is_private: true,
            is_multiple_choice: true,
            multiple_choice_min: settings.min_choices,
            multiple_choice_max: settings.max_choices,
            results_visibility: "always".to_string(),
            require_voter_names: settings.require_voter_names,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollMeta {
    pub timezone: String,
}

/// Request body for the polling service's poll-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollRequest {
    pub title: String,
    pub poll_options: Vec<PollOption>,
    pub poll_config: PollConfig,
    pub poll_meta: PollMeta,
    #[serde(rename = "type")]
    pub poll_type: String,
}

/// Created poll. `raw` is echoed back to the caller untouched.
#[derive(Debug, Clone)]
pub struct PollResult {
    pub url: String,
    pub raw: Value,
}

/// File and pull request recording a new poll link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRecord {
    pub branch: String,
    pub path: String,
    pub content: String,
    pub commit_message: String,
    pub pr_title: String,
    pub pr_body: String,
}

pub const PUBLISH_BRANCH: &str = "update-poll-details";
pub const PUBLISH_PATH: &str = "poll-details.txt";

impl PublishRecord {
    #[must_use]
    pub fn for_link(link: &str) -> Self {
        Self {
            branch: PUBLISH_BRANCH.to_string(),
            path: PUBLISH_PATH.to_string(),
            content: format!("Poll Link: {link}\n"),
            commit_message: "Update poll details".to_string(),
            pr_title: "Update poll details".to_string(),
            pr_body: format!("This PR records the latest weekly poll: {link}"),
        }
    }
}
