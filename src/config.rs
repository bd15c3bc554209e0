//! Sparkle configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Credentials are resolved separately by
//! [`crate::credentials::EnvCredentials`].

use crate::error::{SparkleError, SparkleResult};
use crate::persistence::DEFAULT_KEY;

/// Default bucket holding the sparkle blob.
pub const DEFAULT_BUCKET: &str = "mister-sparkleo";

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Top-level configuration.
///
/// Loaded once at startup via [`SparkleConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparkleConfig {
    /// Bucket holding the sparkle blob (`SPARKLE_BUCKET`).
    pub bucket: String,

    /// Object key of the blob (`SPARKLE_KEY`).
    pub key: String,

    /// Bucket region (`SPARKLE_REGION`).
    pub region: String,

    /// Optional S3-compatible endpoint URL (`SPARKLE_ENDPOINT`).
    pub endpoint: Option<String>,

    /// Number of entries shown per leaderboard (`SPARKLE_LEADERBOARD_SIZE`).
    pub leaderboard_size: usize,
}

impl SparkleConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`SparkleError::Configuration`] if a variable is set but
    /// blank or unparseable.
    pub fn from_env() -> SparkleResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`SparkleError::Configuration`] if a value is set but
    /// blank or unparseable.
    pub fn from_lookup<F>(lookup: F) -> SparkleResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket = non_blank(&lookup, "SPARKLE_BUCKET", DEFAULT_BUCKET)?;
        let key = non_blank(&lookup, "SPARKLE_KEY", DEFAULT_KEY)?;
        let region = non_blank(&lookup, "SPARKLE_REGION", DEFAULT_REGION)?;
        let endpoint = lookup("SPARKLE_ENDPOINT")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let leaderboard_size = match lookup("SPARKLE_LEADERBOARD_SIZE") {
            None => 10,
            Some(raw) => raw.trim().parse().map_err(|_| {
                SparkleError::Configuration(format!(
                    "SPARKLE_LEADERBOARD_SIZE must be a non-negative integer, got {raw:?}"
                ))
            })?,
        };

        Ok(Self {
            bucket,
            key,
            region,
            endpoint,
            leaderboard_size,
        })
    }
}

fn non_blank<F>(lookup: &F, key: &str, default: &str) -> SparkleResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default.to_string()),
        Some(v) if v.trim().is_empty() => Err(SparkleError::Configuration(format!(
            "{key} is set but empty"
        ))),
        Some(v) => Ok(v.trim().to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let Ok(config) = SparkleConfig::from_lookup(lookup_from(&[])) else {
            panic!("defaults must load");
        };
        assert_eq!(config.bucket, DEFAULT_BUCKET);
        assert_eq!(config.key, DEFAULT_KEY);
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.endpoint, None);
        assert_eq!(config.leaderboard_size, 10);
    }

    #[test]
    fn overrides_apply() {
        let Ok(config) = SparkleConfig::from_lookup(lookup_from(&[
            ("SPARKLE_BUCKET", "team-sparkles"),
            ("SPARKLE_KEY", "prod/sparkledb"),
            ("SPARKLE_REGION", "eu-west-1"),
            ("SPARKLE_ENDPOINT", "http://localhost:9000"),
            ("SPARKLE_LEADERBOARD_SIZE", "5"),
        ])) else {
            panic!("overrides must load");
        };
        assert_eq!(config.bucket, "team-sparkles");
        assert_eq!(config.key, "prod/sparkledb");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.leaderboard_size, 5);
    }

    #[test]
    fn blank_bucket_is_rejected() {
        let result = SparkleConfig::from_lookup(lookup_from(&[("SPARKLE_BUCKET", "  ")]));
        assert!(matches!(result, Err(SparkleError::Configuration(_))));
    }

    #[test]
    fn bad_leaderboard_size_is_rejected() {
        let result =
            SparkleConfig::from_lookup(lookup_from(&[("SPARKLE_LEADERBOARD_SIZE", "lots")]));
        assert!(matches!(result, Err(SparkleError::Configuration(_))));
    }

    #[test]
    fn blank_endpoint_is_ignored() {
        let Ok(config) = SparkleConfig::from_lookup(lookup_from(&[("SPARKLE_ENDPOINT", "")]))
        else {
            panic!("blank endpoint must load");
        };
        assert_eq!(config.endpoint, None);
    }
}
