//! Sparkle error types with category code mapping.
//!
//! [`SparkleError`] is the central error type for the crate. Each variant
//! belongs to one failure category with its own numeric code range, which
//! callers can use to decide user-facing messaging.

/// Crate-wide error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category      | Fatal on save | Fatal on load |
/// |-----------|---------------|---------------|---------------|
/// | 1000–1999 | Configuration | yes           | yes           |
/// | 2000–2999 | Transport     | yes           | no            |
/// | 3000–3999 | Codec         | yes           | no            |
#[derive(Debug, thiserror::Error)]
pub enum SparkleError {
    /// Missing or invalid credentials or settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Upload or download against the object store failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Blob content is corrupt or in an incompatible format.
    #[error("decode error: {0}")]
    Decode(String),

    /// The in-memory store could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),
}

impl SparkleError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Configuration(_) => 1001,
            Self::Transport(_) => 2001,
            Self::Decode(_) => 3001,
            Self::Encode(_) => 3002,
        }
    }

    /// Returns `true` if the error aborts startup instead of falling back
    /// to an empty store.
    ///
    /// Only meaningful for the load path: every variant is fatal on save.
    /// Transport and codec failures during [`load`] are downgraded to an
    /// empty store; configuration failures never are.
    ///
    /// [`load`]: crate::persistence::SparkleRepository::load
    #[must_use]
    pub const fn is_fatal_on_load(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Convenience alias used across the crate.
pub type SparkleResult<T> = Result<T, SparkleError>;
