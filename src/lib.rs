//! search-proxy: an authenticated JSON front for scraped web search
//!
//! A query is sent to Google, or to DuckDuckGo's HTML endpoint when Google
//! fails, and the scraped title/link pairs come back deduplicated.

pub mod config;
pub mod engines;
pub mod network;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use engines::Engine;
pub use results::{ResultContainer, SearchResponse, SearchResult};
pub use search::{Search, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of results returned when the caller gives no limit
pub const DEFAULT_LIMIT: usize = 10;

/// Largest limit a caller may request
pub const MAX_LIMIT: usize = 50;

/// Longest pause a caller may request before searching, in seconds
pub const MAX_DELAY_SECS: f64 = 10.0;
