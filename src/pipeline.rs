//! Linear poll pipeline: options, payload, submission, notification, publish.
//!
//! Any failure up to and including notification aborts the run. The publish
//! stage only ever contributes a warning.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::core::models::{PollRequest, PollResult};
use crate::errors::PollError;
use crate::notify::notifier_for;
use crate::poll::{PollClient, build_poll_options};
use crate::publish::{GitHubPublisher, PublishOutcome, publish_record};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Start,
    OptionsBuilt,
    PayloadAssembled,
    Submitted,
    Notified,
    Published,
    PublishFailed,
    PublishSkipped,
    Failed,
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationState::Start => "START",
            InvocationState::OptionsBuilt => "OPTIONS_BUILT",
            InvocationState::PayloadAssembled => "PAYLOAD_ASSEMBLED",
            InvocationState::Submitted => "SUBMITTED",
            InvocationState::Notified => "NOTIFIED",
            InvocationState::Published => "PUBLISHED",
            InvocationState::PublishFailed => "PUBLISH_FAILED",
            InvocationState::PublishSkipped => "PUBLISH_SKIPPED",
            InvocationState::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Successful run. `publish` is `None` when the stage is switched off.
#[derive(Debug, Clone)]
pub struct InvocationOutcome {
    pub poll: PollResult,
    pub notified_via: Option<&'static str>,
    pub publish: Option<PublishOutcome>,
    pub state: InvocationState,
}

impl InvocationOutcome {
    #[must_use]
    pub fn message(&self) -> String {
        match self.notified_via {
            Some(channel) => format!("Poll created and {channel} sent successfully"),
            None => "Poll created successfully".to_string(),
        }
    }

    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        self.publish.as_ref().and_then(PublishOutcome::warning)
    }
}

pub struct PollPipeline {
    config: AppConfig,
    http: Client,
}

impl PollPipeline {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { config, http }
    }

    fn transition(state: &mut InvocationState, next: InvocationState) {
        info!(from = %state, to = %next, "Pipeline transition");
        *state = next;
    }

    /// # Errors
    ///
    /// Returns the first submission or notification error. Publish errors are
    /// reported through [`InvocationOutcome::publish`] instead.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<InvocationOutcome, PollError> {
        let mut state = InvocationState::Start;
        let result = self.run_stages(now, &mut state).await;
        if let Err(e) = &result {
            error!(failed_in = %state, "Poll pipeline failed: {}", e);
            Self::transition(&mut state, InvocationState::Failed);
        }
        result
    }

    async fn run_stages(
        &self,
        now: DateTime<Utc>,
        state: &mut InvocationState,
    ) -> Result<InvocationOutcome, PollError> {
        let settings = self.config.poll;

        let options = build_poll_options(now, settings.week_start);
        Self::transition(state, InvocationState::OptionsBuilt);

        let request = PollRequest::weekly(options, &settings);
        Self::transition(state, InvocationState::PayloadAssembled);

        let client = PollClient::new(
            self.http.clone(),
            &self.config.strawpoll_api_url,
            &self.config.strawpoll_api_key,
        );
        let poll = client.create_poll(&request).await?;
        Self::transition(state, InvocationState::Submitted);

        let notified_via = match notifier_for(&self.config.notify, &self.http) {
            Some(notifier) => {
                notifier.notify(&poll.url).await?;
                Some(notifier.channel())
            }
            None => {
                info!("Notification disabled");
                None
            }
        };
        Self::transition(state, InvocationState::Notified);

        let publish = match &self.config.publish {
            Some(github) => {
                let publisher = GitHubPublisher::new(self.http.clone(), github.clone());
                let outcome = publish_record(&publisher, &poll.url).await;
                let next = match outcome {
                    PublishOutcome::Published { .. } => InvocationState::Published,
                    PublishOutcome::Failed { .. } => InvocationState::PublishFailed,
                };
                Self::transition(state, next);
                Some(outcome)
            }
            None => {
                Self::transition(state, InvocationState::PublishSkipped);
                None
            }
        };

        Ok(InvocationOutcome {
            poll,
            notified_via,
            publish,
            state: *state,
        })
    }
}
