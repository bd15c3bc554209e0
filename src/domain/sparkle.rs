//! A single sparkle award between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied half of a sparkle: who gave it, who got it, and why.
///
/// The timestamp is deliberately absent; it is stamped by the store at
/// insertion time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSparkle {
    /// User issuing the sparkle.
    pub giver: String,
    /// User receiving the sparkle.
    pub receiver: String,
    /// Optional free-text reason.
    pub message: Option<String>,
}

impl NewSparkle {
    /// Creates a sparkle request without a message.
    #[must_use]
    pub fn new(giver: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
            message: None,
        }
    }

    /// Attaches a free-text reason.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Stamps the request, producing a stored [`Sparkle`].
    #[must_use]
    pub fn stamp(self, timestamp: DateTime<Utc>) -> Sparkle {
        Sparkle {
            giver: self.giver,
            receiver: self.receiver,
            timestamp,
            message: self.message,
        }
    }
}

/// One recorded give/receive event.
///
/// Immutable after creation except for `receiver`, which
/// [`super::SparkleStore::migrate_sparkles`] may rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sparkle {
    /// User who issued the sparkle.
    pub giver: String,
    /// User who received the sparkle.
    pub receiver: String,
    /// Insertion time assigned by the store.
    pub timestamp: DateTime<Utc>,
    /// Optional free-text reason.
    pub message: Option<String>,
}

impl Sparkle {
    /// Returns `true` if the event happened strictly after `since`.
    ///
    /// `None` is the zero time: every event matches.
    #[must_use]
    pub fn is_after(&self, since: Option<DateTime<Utc>>) -> bool {
        since.is_none_or(|t| self.timestamp > t)
    }

    /// Case-insensitive receiver comparison.
    #[must_use]
    pub fn received_by(&self, user: &str) -> bool {
        eq_ignore_case(&self.receiver, user)
    }

    /// Case-insensitive giver comparison.
    #[must_use]
    pub fn given_by(&self, user: &str) -> bool {
        eq_ignore_case(&self.giver, user)
    }
}

/// Unicode-aware case-insensitive equality for user names.
///
/// Folds one character at a time, so the result never depends on the
/// surrounding letters (a word-final `Σ` matches `σ`).
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b
        || a.chars()
            .flat_map(char::to_lowercase)
            .eq(b.chars().flat_map(char::to_lowercase))
}
