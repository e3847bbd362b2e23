//! Engine traits and types

use crate::config::EngineConfig;
use crate::results::SearchResult;
use scraper::{ElementRef, Selector};

/// HTTP request to be made by the engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Query parameters, encoded in order
    pub params: Vec<(String, String)>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Full URL with the query string, as it will be sent
    pub fn full_url(&self) -> String {
        match url::Url::parse_with_params(&self.url, &self.params) {
            Ok(url) => url.to_string(),
            Err(_) => self.url.clone(),
        }
    }
}

/// Successful (2xx) HTTP response from an engine request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl EngineResponse {
    /// Wrap an HTML body, mostly for feeding fixtures to extractors
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            status: 200,
            text: text.into(),
            url: String::new(),
        }
    }
}

/// A scraped search engine.
///
/// Each implementation owns its endpoint, its markup selectors and its
/// redirect-unwrap rule, so engines can change independently.
pub trait Engine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Build the HTTP request for a search
    fn request(&self, query: &str) -> anyhow::Result<EngineRequest>;

    /// Extract results from the response, in document order
    fn response(&self, response: EngineResponse) -> anyhow::Result<Vec<SearchResult>>;

    /// Apply configuration overrides (called once on startup)
    fn init(&mut self, _config: &EngineConfig) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Compile a CSS selector, surfacing parse failures as errors
pub(crate) fn selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector {:?}: {:?}", css, e))
}

/// Text content of an element with whitespace collapsed
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
