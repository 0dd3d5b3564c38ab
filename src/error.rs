//! Error types for the SauceNAO client

use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while searching
#[derive(Debug, Error)]
pub enum Error {
    /// The outgoing request could not be built (e.g. the image stream failed to read)
    #[error("failed to build search request: {0}")]
    Construction(#[source] std::io::Error),

    /// The HTTP call itself failed (DNS, connection, TLS, ...)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The search did not complete before its deadline
    #[error("search timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered 429 Too Many Requests
    #[error("rate limited")]
    Quota,

    /// Any other non-200 status
    #[error("unexpected status {0}")]
    UnexpectedStatus(String),

    /// The response body is not a valid search response
    #[error("failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A result payload does not match the requested index schema
    #[error("search result as {index}: {source}")]
    Payload {
        index: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Settings could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if the request was rejected by the service's rate limiter.
    ///
    /// The client never retries on its own; callers that want backoff
    /// should match on this.
    pub fn is_quota(&self) -> bool {
        matches!(self, Error::Quota)
    }

    /// Check if the HTTP exchange itself failed or timed out
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Timeout(_))
    }

    /// Check if a body or payload failed to decode
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::Payload { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(Error::Quota.is_quota());
        assert!(!Error::UnexpectedStatus("500 Internal Server Error".into()).is_quota());
        assert!(Error::Timeout(Duration::from_secs(1)).is_transport());

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(Error::Decode(json_err).is_decode());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(Error::Quota.to_string(), "rate limited");
        assert_eq!(
            Error::UnexpectedStatus("503 Service Unavailable".into()).to_string(),
            "unexpected status 503 Service Unavailable"
        );
    }
}
