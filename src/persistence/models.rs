//! On-blob representation of the sparkle store.

use serde::{Deserialize, Serialize};

use crate::domain::Sparkle;

/// Current envelope version written by [`super::codec::encode`].
pub const FORMAT_VERSION: u32 = 1;

/// The full dataset as it is written to the object store.
///
/// One blob holds every sparkle ever recorded, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkleBlob {
    /// Envelope version; readers reject anything they do not know.
    pub format_version: u32,
    /// Every sparkle, oldest first.
    pub sparkles: Vec<Sparkle>,
}

impl SparkleBlob {
    /// Wraps a sparkle sequence in a current-version envelope.
    #[must_use]
    pub fn new(sparkles: Vec<Sparkle>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            sparkles,
        }
    }
}
