//! Errors raised while talking to a search engine

use std::time::Duration;

/// Failure of a single engine request
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// The engine did not answer within the per-attempt timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure (DNS, refused, reset)
    #[error("connection failed: {0}")]
    Connection(String),

    /// The engine answered with a non-2xx status
    #[error("returned status {0}")]
    Status(u16),

    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),

    /// The request could not be built
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    /// Classify a reqwest send error
    pub(crate) fn from_send(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else if error.is_builder() {
            Self::InvalidRequest(error.to_string())
        } else {
            Self::Connection(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FetchError::Status(503).to_string(), "returned status 503");
        assert_eq!(
            FetchError::Timeout(Duration::from_secs(10)).to_string(),
            "request timed out after 10s"
        );
        assert_eq!(
            FetchError::Connection("refused".into()).to_string(),
            "connection failed: refused"
        );
    }
}
