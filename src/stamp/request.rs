//! The record handed to a stamping backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FlockError, Result};
use crate::flock::FlockMetadata;

/// Base of the per-sheep external URL.
pub const EXTERNAL_URL_BASE: &str = "https://example.com/hexaflock";

/// A stamp payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampRequest {
    pub name: String,
    pub description: String,
    /// Image URI (a PNG data URI).
    pub image: String,
    /// Raw base64 of the PNG, for backends that want it unwrapped.
    pub image_base64: String,
    pub attributes: Map<String, Value>,
    pub external_url: String,
}

impl StampRequest {
    /// Build a stamp payload from generation metadata.
    ///
    /// Attributes are the trait fields plus `seed` and, when known,
    /// `source_txid`.
    pub fn from_metadata(metadata: &FlockMetadata) -> Result<Self> {
        let image_base64 = metadata
            .image_base64()
            .ok_or_else(|| FlockError::Stamp {
                message: format!("Sheep #{} has no PNG data URI", metadata.seed),
                help: None,
            })?
            .to_string();

        let mut attributes = match serde_json::to_value(metadata.traits) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(FlockError::Stamp {
                    message: format!("Traits serialized to {} instead of an object", other),
                    help: None,
                })
            }
            Err(e) => {
                return Err(FlockError::Stamp {
                    message: format!("Failed to serialize traits: {}", e),
                    help: None,
                })
            }
        };
        attributes.insert("seed".to_string(), Value::from(metadata.seed));
        if let Some(txid) = &metadata.source_txid {
            attributes.insert("source_txid".to_string(), Value::from(txid.as_str()));
        }

        Ok(Self {
            name: format!("HexaFlock #{}", metadata.seed),
            description: metadata.description.clone(),
            image: metadata.image_uri.clone(),
            image_base64,
            attributes,
            external_url: format!("{}/{}", EXTERNAL_URL_BASE, metadata.seed),
        })
    }

    /// The seed recorded in the attributes, if any.
    pub fn seed(&self) -> Option<u64> {
        self.attributes.get("seed").and_then(Value::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flock::Flock;
    use crate::style::StyleStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_metadata() {
        let store = StyleStore::builtin().unwrap();
        let result = Flock::new(&store).generate(42).unwrap();
        let request = StampRequest::from_metadata(&result.metadata).unwrap();

        assert_eq!(request.name, "HexaFlock #42");
        assert_eq!(request.external_url, "https://example.com/hexaflock/42");
        assert_eq!(request.image, result.metadata.image_uri);
        assert_eq!(request.image_base64, result.image_base64());
        assert_eq!(request.seed(), Some(42));
        assert_eq!(
            request.attributes["wool_shape"],
            Value::from(result.traits.wool_shape.to_string())
        );
        assert!(request.attributes.get("source_txid").is_none());
    }

    #[test]
    fn test_from_metadata_with_txid() {
        let store = StyleStore::builtin().unwrap();
        let txid = "12".repeat(32);
        let result = Flock::new(&store).generate_from_txid(&txid).unwrap();
        let request = StampRequest::from_metadata(&result.metadata).unwrap();

        assert_eq!(request.attributes["source_txid"], Value::from(txid));
        assert_eq!(request.seed(), Some(result.seed.get()));
    }

    #[test]
    fn test_from_metadata_requires_data_uri() {
        let store = StyleStore::builtin().unwrap();
        let mut metadata = Flock::new(&store).generate(1).unwrap().metadata;
        metadata.image_uri = "ipfs://somewhere".to_string();

        assert!(matches!(
            StampRequest::from_metadata(&metadata),
            Err(FlockError::Stamp { .. })
        ));
    }
}
