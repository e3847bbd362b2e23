//! Settings structures for search-proxy configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Development fallback for the API key when `API_KEY` is not set
pub const DEFAULT_API_KEY: &str = "minha_super_chave";

/// Main settings structure, loadable from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub engines: EnginesSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with process environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("API_KEY") {
            self.server.api_key = val;
        }
        // Hosting platforms hand out the port through PORT; the explicit
        // variable wins when both are set.
        for key in ["PORT", "SEARCH_PROXY_PORT"] {
            if let Some(port) = lookup(key).and_then(|v| v.parse().ok()) {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("SEARCH_PROXY_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.api_key.is_empty() {
            bail!("server.api_key must not be empty");
        }
        if self.outgoing.user_agents.is_empty() {
            bail!("outgoing.user_agents must contain at least one entry");
        }
        if self.outgoing.max_attempts == 0 {
            bail!("outgoing.max_attempts must be at least 1");
        }
        if !(self.outgoing.request_timeout.is_finite() && self.outgoing.request_timeout > 0.0) {
            bail!("outgoing.request_timeout must be a positive number of seconds");
        }
        if !(self.outgoing.backoff_base.is_finite() && self.outgoing.backoff_base >= 0.0) {
            bail!("outgoing.backoff_base must be a non-negative number of seconds");
        }
        Ok(())
    }

    /// Get engine config by name
    pub fn get_engine(&self, name: &str) -> Option<&EngineConfig> {
        self.engines.list.iter().find(|e| e.name == name)
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Value callers must send in the `x-api-key` header
    pub api_key: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_address: "0.0.0.0".to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Per-attempt request timeout in seconds
    pub request_timeout: f64,
    /// Total attempts per engine request, including the first
    pub max_attempts: u32,
    /// Delay before the first retry in seconds, doubled on every retry
    pub backoff_base: f64,
    /// Status codes treated as transient
    pub retry_statuses: Vec<u16>,
    /// Accept-Language header sent to engines
    pub accept_language: String,
    /// User agents, one picked at random per request
    pub user_agents: Vec<String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            max_attempts: 3,
            backoff_base: 1.0,
            retry_statuses: vec![429, 500, 502, 503, 504],
            accept_language: "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
            user_agents: default_user_agents(),
        }
    }
}

/// Engine list wrapper so a YAML file can replace the defaults wholesale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnginesSettings {
    pub list: Vec<EngineConfig>,
}

impl Default for EnginesSettings {
    fn default() -> Self {
        Self {
            list: default_engines(),
        }
    }
}

/// Individual engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Identifier used by the `engine` query parameter and in responses
    pub name: String,
    /// Engine implementation to use
    pub engine: String,
    /// Override of the engine's search endpoint
    pub base_url: Option<String>,
    /// Interface language passed to engines that accept one
    pub language: Option<String>,
    /// Whether engine is disabled
    pub disabled: bool,
}

fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/139.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Safari/605.1.15",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Default engine configurations
fn default_engines() -> Vec<EngineConfig> {
    vec![
        EngineConfig {
            name: "google".to_string(),
            engine: "google".to_string(),
            language: Some("pt-BR".to_string()),
            ..Default::default()
        },
        EngineConfig {
            name: "ddg".to_string(),
            engine: "duckduckgo".to_string(),
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.server.api_key, DEFAULT_API_KEY);
        assert_eq!(settings.outgoing.max_attempts, 3);
        assert_eq!(settings.outgoing.retry_statuses, vec![429, 500, 502, 503, 504]);
        assert_eq!(settings.outgoing.user_agents.len(), 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_engine_lookup() {
        let settings = Settings::default();
        let ddg = settings.get_engine("ddg");
        assert!(ddg.is_some());
        assert_eq!(ddg.unwrap().engine, "duckduckgo");
        assert!(settings.get_engine("bing").is_none());
    }

    #[test]
    fn test_merge_vars() {
        let vars: HashMap<&str, &str> = [
            ("API_KEY", "s3cret"),
            ("PORT", "9000"),
            ("SEARCH_PROXY_BIND_ADDRESS", "127.0.0.1"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.server.api_key, "s3cret");
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.bind_address, "127.0.0.1");
    }

    #[test]
    fn test_explicit_port_wins() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| match key {
            "PORT" => Some("9000".to_string()),
            "SEARCH_PROXY_PORT" => Some("9100".to_string()),
            _ => None,
        });
        assert_eq!(settings.server.port, 9100);
    }

    #[test]
    fn test_unparsable_port_is_ignored() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| (key == "PORT").then(|| "eighty".to_string()));
        assert_eq!(settings.server.port, 8000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.server.api_key.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.outgoing.max_attempts = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.outgoing.user_agents.clear();
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.outgoing.request_timeout = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r#"
server:
  port: 8080
outgoing:
  max_attempts: 5
engines:
  - name: ddg
    engine: duckduckgo
    base_url: http://localhost:9999/html/
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.api_key, DEFAULT_API_KEY);
        assert_eq!(settings.outgoing.max_attempts, 5);
        assert_eq!(settings.outgoing.request_timeout, 10.0);
        assert_eq!(settings.engines.list.len(), 1);
        assert_eq!(
            settings.engines.list[0].base_url.as_deref(),
            Some("http://localhost:9999/html/")
        );
    }
}
