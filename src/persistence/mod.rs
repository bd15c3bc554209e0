//! Persistence layer: the whole store as one blob in an object store.
//!
//! [`SparkleRepository`] encodes the complete [`SparkleStore`] and writes
//! it to a single fixed key through a [`BlobStore`] backend. There is no
//! incremental write path: every save replaces the previous blob, and
//! concurrent writers race with the last save winning.

pub mod blob_store;
pub mod codec;
pub mod memory;
pub mod models;
pub mod s3;

use std::sync::Arc;

pub use blob_store::BlobStore;
pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;

use crate::domain::SparkleStore;
use crate::error::SparkleResult;

/// Default object key holding the serialized store.
pub const DEFAULT_KEY: &str = "sparkledb";

/// Loads and saves the sparkle store under one well-known key.
#[derive(Debug, Clone)]
pub struct SparkleRepository {
    backend: Arc<dyn BlobStore>,
    key: String,
}

impl SparkleRepository {
    /// Creates a repository writing to `key` on the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Returns the object key this repository reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Encodes the full store and overwrites the blob.
    ///
    /// No retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SparkleError::Encode`] if the store cannot
    /// be serialized (nothing is uploaded), or
    /// [`crate::error::SparkleError::Transport`] if the upload fails.
    pub async fn save(&self, store: &SparkleStore) -> SparkleResult<()> {
        let bytes = codec::encode(store)?;
        let size = bytes.len();
        self.backend.put(&self.key, bytes).await?;
        tracing::debug!(key = %self.key, bytes = size, count = store.len(), "sparkle store saved");
        Ok(())
    }

    /// Downloads and decodes the blob.
    ///
    /// Never fails: a missing, unreadable, or corrupt blob yields an empty
    /// store so a fresh deployment starts clean.
    pub async fn load(&self) -> SparkleStore {
        let bytes = match self.backend.get(&self.key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::info!(key = %self.key, "no sparkle store found, starting empty");
                return SparkleStore::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to fetch sparkle store, using a blank one");
                return SparkleStore::new();
            }
        };

        match codec::decode(&bytes) {
            Ok(store) => {
                tracing::info!(key = %self.key, count = store.len(), "sparkle store loaded");
                store
            }
            Err(e) => {
                tracing::warn!(key = %self.key, bytes = bytes.len(), error = %e, "failed to decode sparkle store, using a blank one");
                SparkleStore::new()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use super::BlobStore;
    use crate::error::{SparkleError, SparkleResult};

    /// Backend whose every call fails with a transport error.
    #[derive(Debug, Default)]
    pub(crate) struct UnreachableBlobStore;

    #[async_trait]
    impl BlobStore for UnreachableBlobStore {
        async fn get(&self, _key: &str) -> SparkleResult<Option<Vec<u8>>> {
            Err(SparkleError::Transport("connection refused".to_string()))
        }

        async fn put(&self, _key: &str, _bytes: Vec<u8>) -> SparkleResult<()> {
            Err(SparkleError::Transport("connection refused".to_string()))
        }
    }
}
