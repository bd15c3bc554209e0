//! Object store credentials resolved from the process environment.

use std::fmt;

use crate::error::{SparkleError, SparkleResult};

/// Environment variable holding the access key id.
pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";

/// Environment variable holding the secret access key.
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// Static access key pair.
///
/// `Debug` output never includes the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct EnvCredentials {
    access_key_id: String,
    secret_access_key: String,
}

impl EnvCredentials {
    /// Creates credentials from explicit values.
    #[must_use]
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Reads [`ACCESS_KEY_ID_VAR`] and [`SECRET_ACCESS_KEY_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`SparkleError::Configuration`] if either variable is
    /// missing or blank.
    pub fn from_env() -> SparkleResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves both keys through an arbitrary lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`SparkleError::Configuration`] if either key is missing
    /// or blank.
    pub fn from_lookup<F>(lookup: F) -> SparkleResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key_id = required(&lookup, ACCESS_KEY_ID_VAR)?;
        let secret_access_key = required(&lookup, SECRET_ACCESS_KEY_VAR)?;
        Ok(Self {
            access_key_id,
            secret_access_key,
        })
    }

    /// Returns the access key id.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns the secret access key.
    #[must_use]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for EnvCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

fn required<F>(lookup: &F, key: &str) -> SparkleResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(SparkleError::Configuration(format!("{key} is not set"))),
    }
}
