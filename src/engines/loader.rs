//! Engine loader for initializing engines from configuration

use super::registry::EngineRegistry;
use super::traits::Engine;
use super::{duckduckgo, google};
use crate::config::{EngineConfig, Settings};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing engines from configuration
pub struct EngineLoader;

impl EngineLoader {
    /// Load all enabled engines from settings
    pub fn load(settings: &Settings) -> Result<EngineRegistry> {
        let mut registry = EngineRegistry::new();

        for config in &settings.engines.list {
            if config.disabled {
                info!("Skipping disabled engine: {}", config.name);
                continue;
            }

            match Self::create_engine(config) {
                Ok(engine) => {
                    info!("Loaded engine: {} ({})", config.name, config.engine);
                    registry.register(config.name.clone(), engine);
                }
                Err(e) => {
                    warn!("Failed to load engine {}: {}", config.name, e);
                }
            }
        }

        info!("Loaded {} engines", registry.len());
        Ok(registry)
    }

    /// Create an engine instance from its configuration
    fn create_engine(config: &EngineConfig) -> Result<Arc<dyn Engine>> {
        let mut engine: Box<dyn Engine> = match config.engine.as_str() {
            "google" => Box::new(google::Google::new()),
            "duckduckgo" => Box::new(duckduckgo::DuckDuckGo::new()),
            other => {
                return Err(anyhow::anyhow!("Unknown engine type: {}", other));
            }
        };

        engine.init(config)?;

        Ok(Arc::from(engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let registry = EngineLoader::load(&Settings::default()).unwrap();
        assert_eq!(registry.names(), vec!["ddg", "google"]);
    }

    #[test]
    fn test_skips_disabled_and_unknown() {
        let mut settings = Settings::default();
        settings.engines.list[0].disabled = true;
        settings.engines.list.push(EngineConfig {
            name: "bing".to_string(),
            engine: "bing".to_string(),
            ..Default::default()
        });

        let registry = EngineLoader::load(&settings).unwrap();
        assert_eq!(registry.names(), vec!["ddg"]);
    }
}
