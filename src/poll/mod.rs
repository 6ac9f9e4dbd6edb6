//! Poll construction and submission

pub mod client;
pub mod options;
pub mod request;

pub use client::PollClient;
pub use options::{POLL_TIME_ZONE, build_poll_options, window_start};
