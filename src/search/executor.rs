//! Search execution and engine fallback

use super::error::SearchError;
use super::models::{EngineSelector, SearchRequest, PRIMARY_ENGINE, SECONDARY_ENGINE};
use crate::engines::EngineRegistry;
use crate::network::HttpClient;
use crate::results::{ResultContainer, SearchResponse, SearchResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Search executor that runs a request against one engine or the
/// primary/secondary fallback chain
pub struct Search {
    /// HTTP client for making requests
    client: HttpClient,
    /// Engine registry
    registry: Arc<EngineRegistry>,
}

impl Search {
    /// Create a new search executor
    pub fn new(client: HttpClient, registry: Arc<EngineRegistry>) -> Self {
        Self { client, registry }
    }

    /// Execute a validated search request.
    ///
    /// Engines are tried one after the other. In [`EngineSelector::Auto`]
    /// mode any primary failure triggers the secondary engine; a primary
    /// page with zero results is still a success.
    pub async fn execute(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        if !request.delay.is_zero() {
            info!("Delaying search by {:?}", request.delay);
            tokio::time::sleep(request.delay).await;
        }

        let (engine, results) = match request.engine {
            EngineSelector::Google => (
                PRIMARY_ENGINE,
                self.search_engine(PRIMARY_ENGINE, &request.query).await?,
            ),
            EngineSelector::Ddg => (
                SECONDARY_ENGINE,
                self.search_engine(SECONDARY_ENGINE, &request.query).await?,
            ),
            EngineSelector::Auto => self.search_with_fallback(&request.query).await?,
        };

        let mut container = ResultContainer::new();
        container.extend_results(results);
        debug!(
            "{} distinct results from {}, returning at most {}",
            container.result_count(),
            engine,
            request.limit
        );

        Ok(container.into_response(
            request.query.clone(),
            Some(engine.to_string()),
            request.limit,
        ))
    }

    async fn search_with_fallback(
        &self,
        query: &str,
    ) -> Result<(&'static str, Vec<SearchResult>), SearchError> {
        let primary = match self.search_engine(PRIMARY_ENGINE, query).await {
            Ok(results) => return Ok((PRIMARY_ENGINE, results)),
            Err(e) => e,
        };
        warn!("{}. Falling back to {}", primary, SECONDARY_ENGINE);

        match self.search_engine(SECONDARY_ENGINE, query).await {
            Ok(results) => Ok((SECONDARY_ENGINE, results)),
            Err(secondary) => {
                error!("Both engines failed. {}; {}", primary, secondary);
                Err(SearchError::AllEnginesFailed {
                    primary: Box::new(primary),
                    secondary: Box::new(secondary),
                })
            }
        }
    }

    /// Search a single engine
    async fn search_engine(
        &self,
        name: &str,
        query: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let engine = self
            .registry
            .get(name)
            .ok_or_else(|| SearchError::EngineUnavailable {
                engine: name.to_string(),
            })?;

        let request = engine
            .request(query)
            .map_err(|e| SearchError::engine(name, e))?;

        info!("Querying {}: {}", name, request.full_url());
        let start = Instant::now();

        let response = self
            .client
            .execute(&request)
            .await
            .map_err(|source| SearchError::Fetch {
                engine: name.to_string(),
                source,
            })?;

        let results = engine
            .response(response)
            .map_err(|e| SearchError::engine(name, e))?;

        debug!(
            "Engine {} returned {} results in {:?}",
            name,
            results.len(),
            start.elapsed()
        );
        Ok(results)
    }
}
