//! Offline stamping backend.

use rand::Rng;
use tracing::info;

use crate::error::Result;

use super::{StampBackend, StampRequest};

/// Nominal fee reported when no real estimate is available, in sats.
pub const MOCK_FEE_SATS: u64 = 1000;

/// Returns fabricated transaction ids of the form `mock_tx_<seed>_<nnnnnn>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockStampBackend;

impl MockStampBackend {
    pub fn new() -> Self {
        Self
    }
}

impl StampBackend for MockStampBackend {
    fn create_stamp(&self, request: &StampRequest) -> Result<String> {
        let mut rng = rand::thread_rng();
        let seed = request
            .seed()
            .unwrap_or_else(|| rng.gen_range(1..=1_000_000));
        let tx_hash = format!("mock_tx_{}_{}", seed, rng.gen_range(100_000..=999_999));

        info!(name = %request.name, %tx_hash, "mock stamp created");
        Ok(tx_hash)
    }

    fn estimate_fee(&self, _request: &StampRequest) -> Result<u64> {
        Ok(MOCK_FEE_SATS)
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn is_mock(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flock::Flock;
    use crate::style::StyleStore;

    fn request(seed: u64) -> StampRequest {
        let store = StyleStore::builtin().unwrap();
        let meta = Flock::new(&store).generate(seed).unwrap().metadata;
        StampRequest::from_metadata(&meta).unwrap()
    }

    #[test]
    fn test_mock_tx_format() {
        let tx = MockStampBackend::new().create_stamp(&request(42)).unwrap();

        let suffix = tx.strip_prefix("mock_tx_42_").unwrap();
        assert_eq!(suffix.len(), 6);
        let digits: u32 = suffix.parse().unwrap();
        assert!((100_000..=999_999).contains(&digits));
    }

    #[test]
    fn test_mock_without_seed() {
        let mut req = request(1);
        req.attributes.remove("seed");

        let tx = MockStampBackend::new().create_stamp(&req).unwrap();
        assert!(tx.starts_with("mock_tx_"));
        assert_eq!(tx.split('_').count(), 4);
    }

    #[test]
    fn test_mock_fee() {
        assert_eq!(MockStampBackend::new().estimate_fee(&request(5)).unwrap(), 1000);
        assert_eq!(MockStampBackend::new().name(), "mock");
    }
}
