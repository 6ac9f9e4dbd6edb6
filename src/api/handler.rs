//! Lambda handler for the scheduled poll trigger.
//!
//! The incoming event is only logged; request body and query are ignored.

use chrono::{DateTime, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::helpers;
use crate::core::config::AppConfig;
use crate::errors::PollError;
use crate::pipeline::PollPipeline;

pub use self::function_handler as handler;

/// Lambda handler for the poll entrypoint.
///
/// # Errors
///
/// Never returns `Err`; every failure is mapped to a 500 response payload.
#[tracing::instrument(
    level = "info",
    skip(event),
    fields(invocation_id = %uuid::Uuid::new_v4())
)]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    info!(request_id = %event.context.request_id, "Poll handler started");
    Ok(respond(AppConfig::from_env(), Utc::now()).await)
}

/// Runs one invocation against an already-loaded configuration and maps the
/// outcome to exactly one response.
pub async fn respond(config: Result<AppConfig, PollError>, now: DateTime<Utc>) -> Value {
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("Config error: {}", e);
            return helpers::err_response(500, &e.to_string());
        }
    };

    match PollPipeline::new(config).run(now).await {
        Ok(outcome) => {
            let message = outcome.message();
            info!(state = %outcome.state, "{}", message);
            helpers::ok_response(&message, &outcome.poll.raw, outcome.warning())
        }
        Err(e) if e.is_config() => helpers::err_response(500, &e.to_string()),
        Err(e) => {
            error!(stage = ?e.stage(), "Error creating poll or sending notification: {}", e);
            helpers::err_response(500, helpers::FAILURE_MESSAGE)
        }
    }
}
