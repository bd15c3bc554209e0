//! In-memory sparkle record store with leaderboard aggregation.
//!
//! [`SparkleStore`] holds every sparkle in insertion order. The sequence is
//! the only source of truth: every leaderboard is recomputed from it on
//! each query. The store performs no I/O; persistence is handled by
//! [`crate::persistence::SparkleRepository`].

use chrono::{DateTime, Utc};

use super::leader::{rank, tally};
use super::sparkle::eq_ignore_case;
use super::{Leader, NewSparkle, Sparkle};

/// Ordered, append-only collection of sparkle events.
///
/// # Concurrency
///
/// Not synchronized. Callers sharing one store must serialize access
/// themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparkleStore {
    sparkles: Vec<Sparkle>,
}

impl SparkleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates a store from previously persisted events, keeping their order.
    #[must_use]
    pub fn from_sparkles(sparkles: Vec<Sparkle>) -> Self {
        Self { sparkles }
    }

    /// Returns all events in insertion order.
    #[must_use]
    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    /// Timestamp of the most recently appended event.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.sparkles.last().map(|s| s.timestamp)
    }

    /// Stamps and appends a sparkle, returning the receiver's new total.
    ///
    /// The applied timestamp is `now`, raised to the previous event's
    /// timestamp if the clock went backwards, so insertion order and
    /// timestamp order always agree.
    pub fn record(&mut self, sparkle: NewSparkle, now: DateTime<Utc>) -> Leader {
        let timestamp = self.last_timestamp().map_or(now, |last| last.max(now));
        let receiver = sparkle.receiver.clone();
        self.sparkles.push(sparkle.stamp(timestamp));
        self.leader_for_receiver(&receiver, None)
    }

    /// Returns the total for one receiver, matched exactly.
    ///
    /// A receiver with no sparkles yields a score of zero.
    #[must_use]
    pub fn leader_for_receiver(&self, name: &str, since: Option<DateTime<Utc>>) -> Leader {
        let score = self
            .sparkles
            .iter()
            .filter(|s| s.is_after(since) && s.receiver == name)
            .count();
        Leader::new(name, u64::try_from(score).unwrap_or(u64::MAX))
    }

    /// Per-giver counts of events strictly after `since`. Unordered.
    #[must_use]
    pub fn givers(&self, since: Option<DateTime<Utc>>) -> Vec<Leader> {
        tally(
            self.sparkles
                .iter()
                .filter(|s| s.is_after(since))
                .map(|s| s.giver.as_str()),
        )
    }

    /// Per-receiver counts of events strictly after `since`. Unordered.
    #[must_use]
    pub fn receivers(&self, since: Option<DateTime<Utc>>) -> Vec<Leader> {
        tally(
            self.sparkles
                .iter()
                .filter(|s| s.is_after(since))
                .map(|s| s.receiver.as_str()),
        )
    }

    /// [`Self::givers`] sorted descending by score.
    #[must_use]
    pub fn top_given(&self, since: Option<DateTime<Utc>>) -> Vec<Leader> {
        rank(self.givers(since))
    }

    /// [`Self::receivers`] sorted descending by score.
    #[must_use]
    pub fn top_received(&self, since: Option<DateTime<Utc>>) -> Vec<Leader> {
        rank(self.receivers(since))
    }

    /// The first `limit` entries of [`Self::top_given`].
    #[must_use]
    pub fn top_given_limited(&self, since: Option<DateTime<Utc>>, limit: usize) -> Vec<Leader> {
        let mut leaders = self.top_given(since);
        leaders.truncate(limit);
        leaders
    }

    /// The first `limit` entries of [`Self::top_received`].
    #[must_use]
    pub fn top_received_limited(&self, since: Option<DateTime<Utc>>, limit: usize) -> Vec<Leader> {
        let mut leaders = self.top_received(since);
        leaders.truncate(limit);
        leaders
    }

    /// All sparkles received by `user`, compared case-insensitively, in
    /// insertion order.
    #[must_use]
    pub fn sparkles_for_user(&self, user: &str) -> Vec<Sparkle> {
        self.sparkles
            .iter()
            .filter(|s| s.received_by(user))
            .cloned()
            .collect()
    }

    /// All sparkles given by `user`, compared case-insensitively, in
    /// insertion order.
    #[must_use]
    pub fn sparkles_from_user(&self, user: &str) -> Vec<Sparkle> {
        self.sparkles
            .iter()
            .filter(|s| s.given_by(user))
            .cloned()
            .collect()
    }

    /// Rewrites the receiver of every sparkle addressed to `from` (any
    /// case) to exactly `to`. Returns the number of rewritten events.
    ///
    /// Does not persist; callers save afterwards.
    pub fn migrate_sparkles(&mut self, from: &str, to: &str) -> usize {
        let mut moved = 0_usize;
        for sparkle in self
            .sparkles
            .iter_mut()
            .filter(|s| eq_ignore_case(&s.receiver, from))
        {
            sparkle.receiver = to.to_string();
            moved = moved.saturating_add(1);
        }
        moved
    }
}
