//! Stamping: publishing a sheep record and getting a transaction id back.
//!
//! Generation never depends on stamping. The CLI and batch runner build a
//! `StampRequest` from finished metadata and hand it to a backend chosen by
//! configuration.

mod http;
mod mock;
mod request;

pub use http::HttpStampBackend;
pub use mock::{MockStampBackend, MOCK_FEE_SATS};
pub use request::{StampRequest, EXTERNAL_URL_BASE};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FlockError, Result};

/// A service that can stamp records.
pub trait StampBackend: Send + Sync {
    /// Stamp a record, returning its transaction id.
    fn create_stamp(&self, request: &StampRequest) -> Result<String>;

    /// Estimated cost of stamping a record, in sats.
    fn estimate_fee(&self, request: &StampRequest) -> Result<u64>;

    /// Short backend name for logs and status lines.
    fn name(&self) -> &str;

    /// Whether stamps from this backend are placeholders.
    fn is_mock(&self) -> bool {
        false
    }
}

/// Which backend to stamp with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StampBackendKind {
    #[default]
    Mock,
    Http,
}

/// The `stamp:` section of `flock.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampConfig {
    pub backend: StampBackendKind,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    /// Fall back to the mock backend when the real one fails.
    pub allow_mock_fallback: bool,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            backend: StampBackendKind::Mock,
            endpoint: None,
            timeout_secs: 30,
            allow_mock_fallback: true,
        }
    }
}

/// The configured backend, with optional mock fallback.
pub struct StampService {
    backend: Box<dyn StampBackend>,
    fallback: Option<MockStampBackend>,
}

impl StampService {
    /// Build the service described by a config section.
    pub fn from_config(config: &StampConfig) -> Result<Self> {
        let backend: Box<dyn StampBackend> = match config.backend {
            StampBackendKind::Mock => Box::new(MockStampBackend::new()),
            StampBackendKind::Http => {
                let endpoint = config.endpoint.as_deref().ok_or_else(|| FlockError::ConfigLoad {
                    message: "stamp.backend is http but no stamp.endpoint is set".to_string(),
                    help: Some("Add `endpoint: http://host:port` under `stamp:` in flock.yaml".to_string()),
                })?;
                Box::new(HttpStampBackend::new(endpoint, config.timeout_secs)?)
            }
        };

        Ok(Self::new(backend, config.allow_mock_fallback))
    }

    /// Wrap a backend. A mock backend never needs a fallback.
    pub fn new(backend: Box<dyn StampBackend>, allow_mock_fallback: bool) -> Self {
        let fallback = (allow_mock_fallback && !backend.is_mock()).then(MockStampBackend::new);
        Self { backend, fallback }
    }
}

impl StampBackend for StampService {
    fn create_stamp(&self, request: &StampRequest) -> Result<String> {
        match self.backend.create_stamp(request) {
            Ok(tx_hash) => Ok(tx_hash),
            Err(err) => match &self.fallback {
                Some(mock) => {
                    warn!(backend = self.backend.name(), error = %err, "stamping failed, using mock");
                    mock.create_stamp(request)
                }
                None => Err(err),
            },
        }
    }

    fn estimate_fee(&self, request: &StampRequest) -> Result<u64> {
        match self.backend.estimate_fee(request) {
            Ok(fee) => Ok(fee),
            Err(err) => match &self.fallback {
                Some(mock) => {
                    warn!(backend = self.backend.name(), error = %err, "fee estimate failed, using nominal fee");
                    mock.estimate_fee(request)
                }
                None => Err(err),
            },
        }
    }

    fn name(&self) -> &str {
        self.backend.name()
    }

    fn is_mock(&self) -> bool {
        self.backend.is_mock()
    }
}
