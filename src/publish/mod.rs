//! Best-effort record of each new poll as a source-control pull request.

pub mod github;

use tracing::{info, warn};

use crate::core::models::PublishRecord;
pub use github::GitHubPublisher;

/// Result of the publish stage. Neither variant fails the invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { pr_url: String },
    Failed { warning: String },
}

impl PublishOutcome {
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match self {
            PublishOutcome::Published { .. } => None,
            PublishOutcome::Failed { warning } => Some(warning),
        }
    }
}

/// Runs the publisher and folds any error into a warning.
pub async fn publish_record(publisher: &GitHubPublisher, link: &str) -> PublishOutcome {
    let record = PublishRecord::for_link(link);
    match publisher.publish(&record).await {
        Ok(pr_url) => {
            info!(pr_url = %pr_url, "Poll record published");
            PublishOutcome::Published { pr_url }
        }
        Err(e) => {
            warn!("Publishing poll record failed: {}", e);
            PublishOutcome::Failed {
                warning: format!("Poll record was not published: {e}"),
            }
        }
    }
}
