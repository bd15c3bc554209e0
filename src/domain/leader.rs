//! Leaderboard entries and ranking.

use std::collections::HashMap;

/// A derived `(name, score)` pair. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leader {
    /// Giver or receiver name, exactly as recorded.
    pub name: String,
    /// Number of matching sparkles.
    pub score: u64,
}

impl Leader {
    /// Creates a leader entry.
    #[must_use]
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Counts occurrences of each name in a single pass.
///
/// The result has one entry per distinct name, in no particular order.
pub(crate) fn tally<'a, I>(names: I) -> Vec<Leader>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, u64> = HashMap::new();
    for name in names {
        let entry = counts.entry(name).or_insert(0);
        *entry = entry.saturating_add(1);
    }
    counts
        .into_iter()
        .map(|(name, score)| Leader::new(name, score))
        .collect()
}

/// Sorts descending by score. Ties have no defined order.
pub(crate) fn rank(mut leaders: Vec<Leader>) -> Vec<Leader> {
    leaders.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    leaders
}
