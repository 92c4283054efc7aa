//! Stamping through an HTTP stamping service.
//!
//! The service takes the stamp request as JSON at `POST <endpoint>/stamp`
//! and answers `{"tx_hash": "..."}`; `POST <endpoint>/fee` answers
//! `{"estimated_sats": n}`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{FlockError, Result};

use super::{StampBackend, StampRequest};

#[derive(Debug, Deserialize)]
struct StampResponse {
    tx_hash: String,
}

#[derive(Debug, Deserialize)]
struct FeeResponse {
    estimated_sats: u64,
}

/// Blocking HTTP client for a stamping service.
#[derive(Debug, Clone)]
pub struct HttpStampBackend {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpStampBackend {
    /// Create a backend for `endpoint` with a request timeout.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("hexaflock/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FlockError::Stamp {
                message: format!("Failed to create HTTP client: {}", e),
                help: None,
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post<T: DeserializeOwned>(&self, path: &str, request: &StampRequest) -> Result<T> {
        let url = format!("{}/{}", self.endpoint, path);
        let body = serde_json::to_string(request).map_err(|e| FlockError::Stamp {
            message: format!("Failed to serialize stamp request: {}", e),
            help: None,
        })?;

        debug!(%url, bytes = body.len(), "posting stamp request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .map_err(|e| FlockError::Stamp {
                message: format!("POST {} failed: {}", url, e),
                help: Some("Check stamp.endpoint in flock.yaml and that the service is running".to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlockError::Stamp {
                message: format!("HTTP {} from POST {}", status, url),
                help: None,
            });
        }

        let bytes = response.bytes().map_err(|e| FlockError::Stamp {
            message: format!("Failed to read response from {}: {}", url, e),
            help: None,
        })?;

        serde_json::from_slice(&bytes).map_err(|e| FlockError::Stamp {
            message: format!("Unexpected response from {}: {}", url, e),
            help: None,
        })
    }
}

impl StampBackend for HttpStampBackend {
    fn create_stamp(&self, request: &StampRequest) -> Result<String> {
        let response: StampResponse = self.post("stamp", request)?;
        info!(name = %request.name, tx_hash = %response.tx_hash, "stamp created");
        Ok(response.tx_hash)
    }

    fn estimate_fee(&self, request: &StampRequest) -> Result<u64> {
        let response: FeeResponse = self.post("fee", request)?;
        Ok(response.estimated_sats)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash() {
        let backend = HttpStampBackend::new("http://localhost:9000/", 5).unwrap();
        assert_eq!(backend.endpoint(), "http://localhost:9000");
        assert_eq!(backend.name(), "http");
    }

    #[test]
    fn test_response_shapes() {
        let stamp: StampResponse = serde_json::from_str(r#"{"tx_hash": "abc"}"#).unwrap();
        assert_eq!(stamp.tx_hash, "abc");

        let fee: FeeResponse = serde_json::from_str(r#"{"estimated_sats": 1500}"#).unwrap();
        assert_eq!(fee.estimated_sats, 1500);
    }

    #[test]
    fn test_unreachable_service_is_stamp_error() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        let backend = HttpStampBackend::new("http://127.0.0.1:9", 1).unwrap();
        let store = crate::style::StyleStore::builtin().unwrap();
        let meta = crate::flock::Flock::new(&store).generate(2).unwrap().metadata;
        let request = StampRequest::from_metadata(&meta).unwrap();

        assert!(matches!(
            backend.create_stamp(&request),
            Err(FlockError::Stamp { .. })
        ));
    }
}
