//! Result container for deduplicating and shaping search results

use super::types::{SearchResponse, SearchResult};
use std::collections::HashSet;

/// Ordered, link-deduplicated collection of results
#[derive(Debug, Clone, Default)]
pub struct ResultContainer {
    results: Vec<SearchResult>,
    seen: HashSet<String>,
}

impl ResultContainer {
    /// Create a new empty result container
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a result unless its link is empty or already present.
    ///
    /// Returns `true` when the result was kept.
    pub fn add_result(&mut self, result: SearchResult) -> bool {
        if result.link.is_empty() || self.seen.contains(&result.link) {
            return false;
        }
        self.seen.insert(result.link.clone());
        self.results.push(result);
        true
    }

    /// Add multiple results in order
    pub fn extend_results(&mut self, results: impl IntoIterator<Item = SearchResult>) {
        for result in results {
            self.add_result(result);
        }
    }

    /// Number of distinct results
    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Build the final response, keeping the first `limit` results
    pub fn into_response(
        mut self,
        query: impl Into<String>,
        engine: Option<String>,
        limit: usize,
    ) -> SearchResponse {
        self.results.truncate(limit);
        SearchResponse {
            query: query.into(),
            engine,
            results: self.results,
        }
    }
}
