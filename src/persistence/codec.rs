//! Binary codec for the persisted store.
//!
//! Uses `bincode` over the serde representation of [`SparkleBlob`]. The
//! byte layout is private to this crate; only the round trip matters.

use super::models::{FORMAT_VERSION, SparkleBlob};
use crate::domain::SparkleStore;
use crate::error::{SparkleError, SparkleResult};

/// Serializes the whole store into one blob.
///
/// # Errors
///
/// Returns [`SparkleError::Encode`] if serialization fails. Nothing is
/// returned in that case, so no partial blob can be uploaded.
pub fn encode(store: &SparkleStore) -> SparkleResult<Vec<u8>> {
    let blob = SparkleBlob::new(store.sparkles().to_vec());
    bincode::serialize(&blob).map_err(|e| SparkleError::Encode(e.to_string()))
}

/// Deserializes a blob produced by [`encode`].
///
/// # Errors
///
/// Returns [`SparkleError::Decode`] if the bytes are truncated, corrupt,
/// or carry an unknown format version.
pub fn decode(bytes: &[u8]) -> SparkleResult<SparkleStore> {
    let blob: SparkleBlob =
        bincode::deserialize(bytes).map_err(|e| SparkleError::Decode(e.to_string()))?;
    if blob.format_version != FORMAT_VERSION {
        return Err(SparkleError::Decode(format!(
            "unsupported format version {} (expected {FORMAT_VERSION})",
            blob.format_version
        )));
    }
    Ok(SparkleStore::from_sparkles(blob.sparkles))
}
