//! DuckDuckGo search engine implementation

use super::traits::*;
use crate::config::EngineConfig;
use crate::results::SearchResult;
use anyhow::Result as AnyhowResult;
use percent_encoding::percent_decode_str;
use scraper::Html;
use tracing::debug;
use url::Url;

const DUCKDUCKGO_ORIGIN: &str = "https://duckduckgo.com";

/// DuckDuckGo web search engine, scraped through its HTML-only endpoint
pub struct DuckDuckGo {
    html_url: String,
}

impl DuckDuckGo {
    pub fn new() -> Self {
        Self {
            html_url: "https://html.duckduckgo.com/html/".to_string(),
        }
    }

    fn parse_html_results(&self, html: &str) -> AnyhowResult<Vec<SearchResult>> {
        let document = Html::parse_document(html);
        let title_selector = selector("a.result__a")?;

        let mut results = Vec::new();
        for anchor in document.select(&title_selector) {
            let title = element_text(&anchor);
            let href = anchor.value().attr("href").unwrap_or_default();
            if title.is_empty() || href.is_empty() {
                continue;
            }
            results.push(SearchResult::new(title, resolve_link(href)));
        }

        if results.is_empty() {
            results = self.parse_result_containers(&document)?;
        }

        Ok(results)
    }

    /// Looser pass for markup without `result__a` anchors: the first link
    /// of every result block.
    fn parse_result_containers(&self, document: &Html) -> AnyhowResult<Vec<SearchResult>> {
        let result_selector = selector("div.result")?;
        let link_selector = selector("a")?;

        let mut results = Vec::new();
        for element in document.select(&result_selector) {
            let Some(anchor) = element.select(&link_selector).next() else {
                continue;
            };
            match anchor.value().attr("href") {
                Some(href) if !href.is_empty() => {
                    results.push(SearchResult::new(element_text(&anchor), resolve_link(href)));
                }
                _ => continue,
            }
        }

        Ok(results)
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for DuckDuckGo {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    fn request(&self, query: &str) -> AnyhowResult<EngineRequest> {
        Ok(EngineRequest::get(&self.html_url).param("q", query))
    }

    fn response(&self, response: EngineResponse) -> AnyhowResult<Vec<SearchResult>> {
        let results = self.parse_html_results(&response.text)?;
        debug!("DuckDuckGo page yielded {} results", results.len());
        Ok(results)
    }

    fn init(&mut self, config: &EngineConfig) -> AnyhowResult<()> {
        if let Some(ref base_url) = config.base_url {
            Url::parse(base_url)?;
            self.html_url = base_url.clone();
        }
        Ok(())
    }
}

/// Unwrap `//duckduckgo.com/l/?uddg=<target>` redirects and give
/// protocol-relative links an https scheme.
fn resolve_link(href: &str) -> String {
    let absolute = Url::parse(DUCKDUCKGO_ORIGIN).and_then(|origin| origin.join(href));
    if let Some(target) = absolute.ok().as_ref().and_then(redirect_target) {
        return target;
    }
    if href.starts_with("//") {
        return format!("https:{}", href);
    }
    href.to_string()
}

/// Decoded `uddg` parameter of a redirect link.
///
/// The value is percent-decoded only; a literal `+` is part of the target.
fn redirect_target(url: &Url) -> Option<String> {
    url.query()?
        .split('&')
        .find_map(|pair| pair.strip_prefix("uddg="))
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| percent_decode_str(raw).decode_utf8().ok())
        .map(|target| target.into_owned())
}
