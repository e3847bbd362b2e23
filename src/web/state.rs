//! Application state shared across handlers

use crate::config::Settings;
use crate::engines::EngineRegistry;
use crate::network::HttpClient;
use crate::search::Search;
use std::sync::Arc;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    /// Settings loaded at startup
    pub settings: Arc<Settings>,
    /// Search executor
    pub search: Arc<Search>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, registry: EngineRegistry, client: HttpClient) -> Self {
        let settings = Arc::new(settings);
        let search = Arc::new(Search::new(client, Arc::new(registry)));

        Self { settings, search }
    }

    /// Check a caller-supplied API key against the configured one
    pub fn is_authorized(&self, provided: Option<&str>) -> bool {
        provided.is_some_and(|key| key == self.settings.server.api_key)
    }
}
