//! HTTP networking module
//!
//! Provides the engine client: user-agent rotation, locale headers and a
//! bounded retry policy around every outgoing request.

mod client;
mod error;
mod retry;
mod user_agent;

pub use client::HttpClient;
pub use error::FetchError;
pub use retry::RetryPolicy;
pub use user_agent::pick_user_agent;
