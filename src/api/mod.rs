//! Lambda entrypoint and response shaping

pub mod handler;
pub mod helpers;

// Re-export the main handler for convenience
pub use handler::{handler, respond};
