//! HTTP client for making requests to search engines

use super::retry::RetryPolicy;
use super::user_agent::{accept_html, pick_user_agent};
use super::FetchError;
use crate::config::OutgoingSettings;
use crate::engines::{EngineRequest, EngineResponse};
use anyhow::{bail, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client wrapper applying user-agent rotation, locale headers and retries
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
    retry: RetryPolicy,
    user_agents: Arc<[String]>,
    accept_language: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        if settings.user_agents.is_empty() {
            bail!("at least one user agent is required");
        }

        let timeout = match Duration::try_from_secs_f64(settings.request_timeout) {
            Ok(timeout) if !timeout.is_zero() => timeout,
            _ => bail!("request timeout must be a positive number of seconds"),
        };
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            timeout,
            retry: RetryPolicy::from_settings(settings),
            user_agents: settings.user_agents.clone().into(),
            accept_language: settings.accept_language.clone(),
        })
    }

    /// Retry policy in effect
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Execute an engine request, retrying transient failures.
    ///
    /// Only 2xx responses are returned as `Ok`. Every other outcome is a
    /// [`FetchError`]; retryable ones are attempted again until the policy
    /// runs out.
    pub async fn execute(&self, request: &EngineRequest) -> Result<EngineResponse, FetchError> {
        let user_agent = pick_user_agent(&self.user_agents)
            .ok_or_else(|| FetchError::InvalidRequest("empty user agent pool".into()))?;

        let mut attempt = 1;
        loop {
            match self.send_once(request, user_agent).await {
                Ok(response) => return Ok(response),
                Err(err)
                    if self.retry.has_attempts_left(attempt) && self.retry.is_retryable(&err) =>
                {
                    let backoff = self.retry.backoff_for(attempt);
                    warn!(
                        url = %request.url,
                        attempt,
                        error = %err,
                        "Engine request failed, retrying in {:?}",
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once(
        &self,
        request: &EngineRequest,
        user_agent: &str,
    ) -> Result<EngineResponse, FetchError> {
        let mut req_builder = self
            .client
            .get(&request.url)
            .timeout(self.timeout)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT, accept_html())
            .header(ACCEPT_LANGUAGE, &self.accept_language);

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| FetchError::from_send(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let url = response.url().to_string();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Body(e.to_string())
            }
        })?;

        debug!("Fetched {} ({} bytes)", url, text.len());

        Ok(EngineResponse {
            status: status.as_u16(),
            text,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_settings() -> OutgoingSettings {
        OutgoingSettings {
            request_timeout: 0.5,
            backoff_base: 0.01,
            ..Default::default()
        }
    }

    fn search_request(server: &MockServer) -> EngineRequest {
        EngineRequest::get(format!("{}/search", server.uri())).param("q", "rust lang")
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_empty_user_agent_pool_is_rejected() {
        let settings = OutgoingSettings {
            user_agents: vec![],
            ..Default::default()
        };
        assert!(HttpClient::with_settings(&settings).is_err());
    }

    #[tokio::test]
    async fn test_sends_query_and_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust lang"))
            .and(header_exists("user-agent"))
            .and(header_exists("accept-language"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::with_settings(&fast_settings()).unwrap();
        let response = client.execute(&search_request(&server)).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.text, "<html></html>");
    }

    #[tokio::test]
    async fn test_retries_transient_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::with_settings(&fast_settings()).unwrap();
        let response = client.execute(&search_request(&server)).await.unwrap();
        assert_eq!(response.text, "ok");
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let client = HttpClient::with_settings(&fast_settings()).unwrap();
        let err = client.execute(&search_request(&server)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_non_retryable_status_fails_immediately() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::with_settings(&fast_settings()).unwrap();
        let err = client.execute(&search_request(&server)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(403)));
    }

    #[tokio::test]
    async fn test_timeout_is_retried_then_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let settings = OutgoingSettings {
            request_timeout: 0.1,
            backoff_base: 0.01,
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        let err = client.execute(&search_request(&server)).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_retried() {
        let settings = OutgoingSettings {
            request_timeout: 0.5,
            backoff_base: 0.1,
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        let request = EngineRequest::get("http://127.0.0.1:1/search");

        let start = std::time::Instant::now();
        let err = client.execute(&request).await.unwrap_err();

        assert!(matches!(err, FetchError::Connection(_) | FetchError::Timeout(_)));
        // two backoff sleeps: 100ms then 200ms
        assert!(start.elapsed() >= Duration::from_millis(300), "{:?}", start.elapsed());
    }

    #[tokio::test]
    async fn test_cookies_are_not_carried_between_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header_exists("cookie"))
            .respond_with(ResponseTemplate::new(200).set_body_string("with-cookie"))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "NID=first-caller; Path=/")
                    .set_body_string("fresh"),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = HttpClient::with_settings(&fast_settings()).unwrap();
        let first = client.execute(&search_request(&server)).await.unwrap();
        let second = client.execute(&search_request(&server)).await.unwrap();

        assert_eq!(first.text, "fresh");
        assert_eq!(second.text, "fresh");
    }
}
