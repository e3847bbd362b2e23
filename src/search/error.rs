//! Errors raised while orchestrating a search

use crate::network::FetchError;

/// Failure of a search across one or more engines
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The requested engine is disabled or unknown
    #[error("engine {engine} is not available")]
    EngineUnavailable { engine: String },

    /// The engine could not be reached or answered with a bad status
    #[error("{engine} request failed: {source}")]
    Fetch {
        engine: String,
        #[source]
        source: FetchError,
    },

    /// The engine request could not be built or its page not parsed
    #[error("{engine} failed: {reason}")]
    Engine { engine: String, reason: String },

    /// Both engines failed in automatic mode
    #[error("all search engines failed. {primary}; {secondary}")]
    AllEnginesFailed {
        primary: Box<SearchError>,
        secondary: Box<SearchError>,
    },
}

impl SearchError {
    pub fn engine(engine: &str, reason: impl std::fmt::Display) -> Self {
        Self::Engine {
            engine: engine.to_string(),
            reason: reason.to_string(),
        }
    }
}
