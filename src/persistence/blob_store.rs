//! Opaque key/value blob backend.

use std::fmt;

use async_trait::async_trait;

use crate::error::SparkleResult;

/// Whole-object storage keyed by name.
///
/// Implementations overwrite the full object on every [`put`](Self::put);
/// there is no append or partial update.
#[async_trait]
pub trait BlobStore: Send + Sync + fmt::Debug {
    /// Downloads the object at `key`.
    ///
    /// Returns `Ok(None)` when no object exists under that key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SparkleError::Transport`] on any other
    /// failure.
    async fn get(&self, key: &str) -> SparkleResult<Option<Vec<u8>>>;

    /// Uploads `bytes` to `key`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SparkleError::Transport`] if the upload is
    /// not acknowledged.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> SparkleResult<()>;
}
