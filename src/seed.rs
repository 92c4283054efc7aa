//! Seeds and their derivation from transaction ids.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FlockError, Result};

/// Length of a transaction id in hex characters.
pub const TXID_LEN: usize = 64;

/// Seeds derived from txids are reduced into the positive 31-bit range.
const SEED_MODULUS: u64 = 2_147_483_647;

/// A positive integer seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Seed(NonZeroU64);

impl Seed {
    /// Create a seed, rejecting zero.
    pub fn new(value: u64) -> Result<Self> {
        NonZeroU64::new(value)
            .map(Seed)
            .ok_or_else(|| FlockError::InvalidSeed {
                value: value.to_string(),
            })
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl FromStr for Seed {
    type Err = FlockError;

    /// Parse a decimal seed. Negative numbers, fractions and junk are all
    /// `InvalidSeed`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let value = trimmed.parse::<u64>().map_err(|_| FlockError::InvalidSeed {
            value: trimmed.to_string(),
        })?;
        Self::new(value)
    }
}

impl TryFrom<u64> for Seed {
    type Error = FlockError;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Seed> for u64 {
    fn from(seed: Seed) -> Self {
        seed.get()
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalize and check a txid: trimmed, lower-case, 64 hex characters.
pub fn normalize_txid(txid: &str) -> Result<String> {
    let normalized = txid.trim().to_ascii_lowercase();

    if normalized.len() != TXID_LEN || !normalized.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FlockError::InvalidTxid {
            value: txid.to_string(),
        });
    }

    Ok(normalized)
}

/// Derive a seed from a transaction id.
///
/// The txid is split into four 16-character chunks, each read as a 64-bit
/// integer. The chunks are XORed together and reduced modulo 2147483647;
/// a zero result maps to 1.
pub fn seed_from_txid(txid: &str) -> Result<Seed> {
    let normalized = normalize_txid(txid)?;

    let mut mixed = 0u64;
    for start in (0..TXID_LEN).step_by(16) {
        let chunk = &normalized[start..start + 16];
        let part = u64::from_str_radix(chunk, 16).map_err(|_| FlockError::InvalidTxid {
            value: txid.to_string(),
        })?;
        mixed ^= part;
    }

    Seed::new((mixed % SEED_MODULUS).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_rejects_zero() {
        assert!(matches!(Seed::new(0), Err(FlockError::InvalidSeed { .. })));
        assert_eq!(Seed::new(42).unwrap().get(), 42);
    }

    #[test]
    fn test_seed_from_str() {
        assert_eq!("123".parse::<Seed>().unwrap().get(), 123);
        assert_eq!(" 7 ".parse::<Seed>().unwrap().get(), 7);

        for bad in ["0", "-1", "1.5", "abc", "", "18446744073709551616"] {
            assert!(
                matches!(bad.parse::<Seed>(), Err(FlockError::InvalidSeed { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_seed_serde() {
        let seed = Seed::new(99).unwrap();
        assert_eq!(serde_json::to_string(&seed).unwrap(), "99");
        assert_eq!(serde_json::from_str::<Seed>("99").unwrap(), seed);
        assert!(serde_json::from_str::<Seed>("0").is_err());
    }

    #[test]
    fn test_all_zero_txid_maps_to_one() {
        let txid = "00".repeat(32);
        assert_eq!(seed_from_txid(&txid).unwrap().get(), 1);
    }

    #[test]
    fn test_txid_xor_of_chunks() {
        // Only the last chunk is non-zero.
        let txid = format!("{}{}", "0".repeat(48), "000000000000002a");
        assert_eq!(seed_from_txid(&txid).unwrap().get(), 42);

        // Two identical chunks cancel out.
        let txid = format!("{}{}{}", "0000000000000005", "0000000000000005", "0".repeat(32));
        assert_eq!(seed_from_txid(&txid).unwrap().get(), 1);
    }

    #[test]
    fn test_txid_reduced_modulo() {
        // 0x7fffffff == 2147483647 reduces to 0, which maps to 1.
        let txid = format!("{}{}", "0".repeat(48), "000000007fffffff");
        assert_eq!(seed_from_txid(&txid).unwrap().get(), 1);

        // All ones in one chunk: u64::MAX % 2147483647 == 3.
        let txid = format!("{}{}", "f".repeat(16), "0".repeat(48));
        assert_eq!(seed_from_txid(&txid).unwrap().get(), u64::MAX % 2_147_483_647);
    }

    #[test]
    fn test_txid_case_and_whitespace() {
        let lower = format!("{}{}", "ab".repeat(16), "cd".repeat(16));
        let upper = format!("  {}\n", lower.to_uppercase());
        assert_eq!(seed_from_txid(&lower).unwrap(), seed_from_txid(&upper).unwrap());
    }

    #[test]
    fn test_invalid_txids() {
        let too_short = "0".repeat(63);
        let too_long = "0".repeat(65);
        let non_hex = format!("{}g", "0".repeat(63));
        let multibyte = format!("{}é", "0".repeat(62));

        for bad in [too_short, too_long, non_hex, multibyte, String::new()] {
            assert!(
                matches!(seed_from_txid(&bad), Err(FlockError::InvalidTxid { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
