//! Search request models and boundary validation

use crate::{DEFAULT_LIMIT, MAX_DELAY_SECS, MAX_LIMIT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Identifier of the primary engine
pub const PRIMARY_ENGINE: &str = "google";
/// Identifier of the engine used when the primary fails
pub const SECONDARY_ENGINE: &str = "ddg";

/// Which engine(s) a search should use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineSelector {
    /// Primary engine, falling back to the secondary on failure
    #[default]
    Auto,
    /// Primary engine only
    Google,
    /// Secondary engine only
    Ddg,
}

impl EngineSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Google => PRIMARY_ENGINE,
            Self::Ddg => SECONDARY_ENGINE,
        }
    }
}

impl fmt::Display for EngineSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineSelector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "google" => Ok(Self::Google),
            "ddg" => Ok(Self::Ddg),
            other => Err(ValidationError::UnknownEngine(other.to_string())),
        }
    }
}

/// Rejection of caller input before any network call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("query parameter 'q' must not be empty")]
    EmptyQuery,

    #[error("unknown engine '{0}', expected one of auto, google, ddg")]
    UnknownEngine(String),

    #[error("limit must be an integer between 1 and {max}, got '{value}'")]
    InvalidLimit { value: String, max: usize },

    #[error("delay must be a number of seconds between 0 and {max}, got '{value}'")]
    InvalidDelay { value: String, max: f64 },
}

/// Raw query-string parameters of the search endpoint
#[derive(Debug, Default, PartialEq)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// Engine selector (auto|google|ddg)
    pub engine: Option<String>,
    /// Maximum number of results
    pub limit: Option<String>,
    /// Pause before searching, in seconds
    pub delay: Option<String>,
}

impl SearchParams {
    /// Collect the known parameters from a URL query string; for repeated
    /// keys the last value wins and unknown keys are ignored.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "q" => &mut params.q,
                "engine" => &mut params.engine,
                "limit" => &mut params.limit,
                "delay" => &mut params.delay,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        params
    }

    /// Validate raw parameters into a [`SearchRequest`]
    pub fn into_request(self) -> Result<SearchRequest, ValidationError> {
        let query = match self.q {
            Some(q) if !q.trim().is_empty() => q,
            _ => return Err(ValidationError::EmptyQuery),
        };

        let engine = match self.engine.as_deref() {
            None | Some("") => EngineSelector::default(),
            Some(raw) => raw.parse()?,
        };

        let limit = match self.limit.as_deref() {
            None | Some("") => DEFAULT_LIMIT,
            Some(raw) => parse_limit(raw)?,
        };

        let delay = match self.delay.as_deref() {
            None | Some("") => Duration::ZERO,
            Some(raw) => parse_delay(raw)?,
        };

        Ok(SearchRequest {
            query,
            engine,
            limit,
            delay,
        })
    }
}

fn parse_limit(raw: &str) -> Result<usize, ValidationError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|limit| (1..=MAX_LIMIT).contains(limit))
        .ok_or_else(|| ValidationError::InvalidLimit {
            value: raw.to_string(),
            max: MAX_LIMIT,
        })
}

fn parse_delay(raw: &str) -> Result<Duration, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && (0.0..=MAX_DELAY_SECS).contains(secs))
        .map(Duration::from_secs_f64)
        .ok_or_else(|| ValidationError::InvalidDelay {
            value: raw.to_string(),
            max: MAX_DELAY_SECS,
        })
}

/// A validated search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Query string, never empty
    pub query: String,
    /// Engine selection mode
    pub engine: EngineSelector,
    /// Maximum number of results, 1..=MAX_LIMIT
    pub limit: usize,
    /// Pause before the first network call
    pub delay: Duration,
}

impl SearchRequest {
    /// Request with default engine, limit and delay
    pub fn simple(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            engine: EngineSelector::default(),
            limit: DEFAULT_LIMIT,
            delay: Duration::ZERO,
        }
    }

    pub fn with_engine(mut self, engine: EngineSelector) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_LIMIT);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay.min(Duration::from_secs_f64(MAX_DELAY_SECS));
        self
    }
}
