//! HTTP client for the Civic Information `voterinfo` endpoint.
//!
//! One GET per query, carrying `key` and `address` parameters. The result
//! is delivered back to the event loop as an action, so everything here
//! returns `Result` instead of touching session state.

use std::fmt;
use std::time::Duration;

use log::warn;

use super::types::VoterInfoResponse;

/// Production endpoint. Tests override it through [`CivicClient::new`].
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/civicinfo/v2/voterinfo";

/// How a voter-info fetch can fail. Variants map one-to-one onto the error
/// screens: transport, upstream status, undecodable body, decoded body
/// missing the election day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused). No HTTP
    /// status is available.
    Network(String),
    /// The API answered with a non-200 status.
    Http { status: u16 },
    /// The body arrived but could not be decoded as voterinfo JSON.
    Parse(String),
    /// The body decoded, but `election.electionDay` was absent or empty.
    MissingElectionDay,
}

impl FetchError {
    /// The HTTP status code, when the upstream produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Http { status } => write!(f, "received non-200 response: HTTP {status}"),
            FetchError::Parse(msg) => write!(f, "could not decode response: {msg}"),
            FetchError::MissingElectionDay => {
                write!(f, "could not extract election day from response")
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// The fetch collaborator. Cheap to clone; clones share the underlying
/// connection pool.
#[derive(Clone)]
pub struct CivicClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl CivicClient {
    /// `base_url` of `None` means the production endpoint.
    pub fn new(api_key: impl Into<String>, base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: api_key.into(),
            timeout,
        }
    }

    /// Fetches voter information for a free-text address.
    pub async fn voter_info(&self, address: &str) -> Result<VoterInfoResponse, FetchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("key", self.api_key.as_str()), ("address", address)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!("voter info request failed: {e}");
                FetchError::Network(e.to_string())
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("voter info request returned HTTP {status}");
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let data: VoterInfoResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        if data.election.election_day.is_empty() {
            return Err(FetchError::MissingElectionDay);
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_present_for_http_errors() {
        assert_eq!(FetchError::Http { status: 503 }.status(), Some(503));
        assert_eq!(FetchError::Network("timed out".into()).status(), None);
        assert_eq!(FetchError::Parse("bad json".into()).status(), None);
        assert_eq!(FetchError::MissingElectionDay.status(), None);
    }

    #[test]
    fn display_includes_status_code() {
        let err = FetchError::Http { status: 404 };
        assert_eq!(err.to_string(), "received non-200 response: HTTP 404");
    }
}
