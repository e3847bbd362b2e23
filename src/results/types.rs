//! Result type definitions

use serde::{Deserialize, Serialize};

/// A single scraped search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Visible title of the result
    pub title: String,
    /// Destination URL, after any redirect unwrapping
    pub link: String,
}

impl SearchResult {
    /// Create a new result
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Payload returned to callers of the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query exactly as received
    pub query: String,
    /// Engine that produced the results
    pub engine: Option<String>,
    /// Deduplicated results, at most `limit` entries
    pub results: Vec<SearchResult>,
}
