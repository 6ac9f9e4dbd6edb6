//! Weekly Poll - a scheduled Lambda that opens a weekly availability poll.
//!
//! Each invocation:
//! 1. Builds fourteen day-labelled options for a Monday-first week in Berlin time
//! 2. Creates the poll through the StrawPoll v3 API
//! 3. Sends the shareable link over WhatsApp (Twilio) or email (SMTP)
//! 4. Optionally records the link in a GitHub pull request
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution, triggered by an external scheduler
//! - reqwest for the polling, messaging and GitHub REST calls
//! - lettre for SMTP delivery
//! - chrono-tz for time zone aware date labels
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use weekly_poll::core::config::AppConfig;
//! use weekly_poll::pipeline::PollPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     weekly_poll::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let outcome = PollPipeline::new(config).run(chrono::Utc::now()).await?;
//!     println!("{}: {}", outcome.message(), outcome.poll.url);
//!     Ok(())
//! }
//! ```
// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod notify;
pub mod pipeline;
pub mod poll;
pub mod publish;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Calling it more than once is harmless; only
/// the first call installs the subscriber.
///
/// # Example
///
/// ```
/// weekly_poll::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
