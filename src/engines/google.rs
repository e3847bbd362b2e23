//! Google search engine implementation

use super::traits::*;
use crate::config::EngineConfig;
use crate::results::SearchResult;
use anyhow::Result as AnyhowResult;
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

const GOOGLE_ORIGIN: &str = "https://www.google.com";

/// Google web search engine
pub struct Google {
    base_url: String,
    language: String,
}

impl Google {
    pub fn new() -> Self {
        Self {
            base_url: format!("{}/search", GOOGLE_ORIGIN),
            language: "pt-BR".to_string(),
        }
    }

    /// Every `h3` is a candidate title; its enclosing anchor carries the link.
    fn parse_results(&self, html: &str) -> AnyhowResult<Vec<SearchResult>> {
        let document = Html::parse_document(html);
        let heading_selector = selector("h3")?;

        let mut results = Vec::new();
        for heading in document.select(&heading_selector) {
            let Some(href) = enclosing_link(&heading).and_then(|a| a.value().attr("href")) else {
                continue;
            };
            let Some(link) = resolve_link(href) else {
                continue;
            };
            results.push(SearchResult::new(element_text(&heading), link));
        }

        Ok(results)
    }
}

impl Default for Google {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for Google {
    fn name(&self) -> &str {
        "google"
    }

    fn request(&self, query: &str) -> AnyhowResult<EngineRequest> {
        let mut request = EngineRequest::get(&self.base_url).param("q", query);
        if !self.language.is_empty() {
            request = request.param("hl", &self.language);
        }
        Ok(request)
    }

    fn response(&self, response: EngineResponse) -> AnyhowResult<Vec<SearchResult>> {
        let results = self.parse_results(&response.text)?;
        debug!("Google page yielded {} results", results.len());
        Ok(results)
    }

    fn init(&mut self, config: &EngineConfig) -> AnyhowResult<()> {
        if let Some(ref base_url) = config.base_url {
            Url::parse(base_url)?;
            self.base_url = base_url.clone();
        }
        if let Some(ref language) = config.language {
            self.language = language.clone();
        }
        Ok(())
    }
}

/// Nearest `a` ancestor of an element
fn enclosing_link<'a>(element: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "a")
}

/// Resolve a result href to its destination.
///
/// `/url?q=<target>` wrappers are unwrapped; any other site-relative link
/// points back into Google and is dropped.
fn resolve_link(href: &str) -> Option<String> {
    if href.starts_with("/url?") {
        let wrapper = Url::parse(GOOGLE_ORIGIN).ok()?.join(href).ok()?;
        return wrapper
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, target)| target.into_owned())
            .filter(|target| !target.is_empty());
    }
    if href.is_empty() || href.starts_with('/') {
        return None;
    }
    Some(href.to_string())
}
