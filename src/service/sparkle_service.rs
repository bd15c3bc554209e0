//! Sparkle service: records awards and persists the store after each one.

use chrono::{DateTime, Utc};

use crate::domain::{Leader, NewSparkle, Sparkle, SparkleStore};
use crate::error::SparkleResult;
use crate::persistence::SparkleRepository;

/// Owns the in-memory [`SparkleStore`] and the [`SparkleRepository`] it is
/// persisted through.
///
/// Every mutation follows the pattern: update memory → save the full
/// store → return result. Reads never touch the repository.
///
/// # Concurrency
///
/// Mutating methods take `&mut self`; a caller sharing one service across
/// tasks must wrap it in its own lock.
#[derive(Debug)]
pub struct SparkleService {
    store: SparkleStore,
    repository: SparkleRepository,
}

impl SparkleService {
    /// Creates a service around an already-hydrated store.
    #[must_use]
    pub fn new(store: SparkleStore, repository: SparkleRepository) -> Self {
        Self { store, repository }
    }

    /// Hydrates the store from the repository once.
    ///
    /// A missing or unreadable blob starts the service empty.
    pub async fn load(repository: SparkleRepository) -> Self {
        let store = repository.load().await;
        Self::new(store, repository)
    }

    /// Returns the in-memory store.
    #[must_use]
    pub fn store(&self) -> &SparkleStore {
        &self.store
    }

    /// Stamps the sparkle with the current time, appends it, saves the
    /// whole store, and returns the receiver's updated total.
    ///
    /// If the save fails the sparkle stays in memory and the error is
    /// returned: the award happened, but its durability is unknown until
    /// the next successful save.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::error::SparkleError`] raised by
    /// [`SparkleRepository::save`].
    pub async fn add_sparkle(&mut self, sparkle: NewSparkle) -> SparkleResult<Leader> {
        self.add_sparkle_at(sparkle, Utc::now()).await
    }

    /// [`Self::add_sparkle`] with an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::error::SparkleError`] raised by
    /// [`SparkleRepository::save`].
    pub async fn add_sparkle_at(
        &mut self,
        sparkle: NewSparkle,
        now: DateTime<Utc>,
    ) -> SparkleResult<Leader> {
        let giver = sparkle.giver.clone();
        let leader = self.store.record(sparkle, now);

        if let Err(e) = self.repository.save(&self.store).await {
            tracing::warn!(
                %giver,
                receiver = %leader.name,
                error = %e,
                "sparkle recorded in memory but not persisted"
            );
            return Err(e);
        }

        tracing::info!(%giver, receiver = %leader.name, total = leader.score, "sparkle added");
        Ok(leader)
    }

    /// Moves every sparkle received by `from` (any case) to exactly `to`,
    /// then saves. Returns the number of rewritten sparkles.
    ///
    /// Nothing is saved when no sparkle matched.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::error::SparkleError`] raised by
    /// [`SparkleRepository::save`]; the rewrite stays applied in memory.
    pub async fn migrate_and_save(&mut self, from: &str, to: &str) -> SparkleResult<usize> {
        let moved = self.store.migrate_sparkles(from, to);
        if moved == 0 {
            tracing::debug!(from, to, "no sparkles to migrate");
            return Ok(0);
        }
        self.repository.save(&self.store).await?;
        tracing::info!(from, to, count = moved, "sparkles migrated");
        Ok(moved)
    }

    /// Persists the current store unconditionally.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::error::SparkleError`] raised by
    /// [`SparkleRepository::save`].
    pub async fn save(&self) -> SparkleResult<()> {
        self.repository.save(&self.store).await
    }

    /// See [`SparkleStore::givers`].
    #[must_use]
    pub fn givers(&self, since: Option<DateTime<Utc>>) -> Vec<Leader> {
        self.store.givers(since)
    }

    /// See [`SparkleStore::receivers`].
    #[must_use]
    pub fn receivers(&self, since: Option<DateTime<Utc>>) -> Vec<Leader> {
        self.store.receivers(since)
    }

    /// See [`SparkleStore::top_given`].
    #[must_use]
    pub fn top_given(&self, since: Option<DateTime<Utc>>) -> Vec<Leader> {
        self.store.top_given(since)
    }

    /// See [`SparkleStore::top_received`].
    #[must_use]
    pub fn top_received(&self, since: Option<DateTime<Utc>>) -> Vec<Leader> {
        self.store.top_received(since)
    }

    /// See [`SparkleStore::sparkles_for_user`].
    #[must_use]
    pub fn sparkles_for_user(&self, user: &str) -> Vec<Sparkle> {
        self.store.sparkles_for_user(user)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::SparkleError;
    use crate::persistence::test_support::UnreachableBlobStore;
    use crate::persistence::{BlobStore, DEFAULT_KEY, MemoryBlobStore};

    fn make_service() -> (SparkleService, Arc<MemoryBlobStore>) {
        let backend = Arc::new(MemoryBlobStore::new());
        let repo = SparkleRepository::new(Arc::clone(&backend) as Arc<dyn BlobStore>, DEFAULT_KEY);
        (SparkleService::new(SparkleStore::new(), repo), backend)
    }

    fn make_failing_service() -> SparkleService {
        let repo = SparkleRepository::new(Arc::new(UnreachableBlobStore), DEFAULT_KEY);
        SparkleService::new(SparkleStore::new(), repo)
    }

    #[tokio::test]
    async fn add_sparkle_returns_receiver_total() {
        let (mut service, _) = make_service();

        let Ok(first) = service.add_sparkle(NewSparkle::new("alice", "bob")).await else {
            panic!("add failed");
        };
        assert_eq!(first, Leader::new("bob", 1));

        let Ok(second) = service
            .add_sparkle(NewSparkle::new("carol", "bob").with_message("pairing"))
            .await
        else {
            panic!("add failed");
        };
        assert_eq!(second, Leader::new("bob", 2));
    }

    #[tokio::test]
    async fn add_sparkle_persists_every_time() {
        let (mut service, backend) = make_service();
        let reload = SparkleRepository::new(Arc::clone(&backend) as Arc<dyn BlobStore>, DEFAULT_KEY);

        for n in 1..=3_usize {
            assert!(service.add_sparkle(NewSparkle::new("alice", "bob")).await.is_ok());
            assert_eq!(reload.load().await.len(), n);
        }
    }

    #[tokio::test]
    async fn receivers_total_matches_add_count() {
        let (mut service, _) = make_service();
        let pairs = [("a", "b"), ("b", "c"), ("c", "a"), ("a", "b"), ("d", "B")];
        for (giver, receiver) in pairs {
            assert!(service.add_sparkle(NewSparkle::new(giver, receiver)).await.is_ok());
        }
        let total: u64 = service.receivers(None).iter().map(|l| l.score).sum();
        assert_eq!(total, 5);
        let given: u64 = service.givers(None).iter().map(|l| l.score).sum();
        assert_eq!(given, 5);
    }

    #[tokio::test]
    async fn timestamps_are_assigned_and_non_decreasing() {
        let (mut service, _) = make_service();
        let before = Utc::now();
        for _ in 0..5 {
            assert!(service.add_sparkle(NewSparkle::new("alice", "bob")).await.is_ok());
        }
        let sparkles = service.store().sparkles();
        assert!(sparkles.iter().all(|s| s.timestamp >= before));
        assert!(sparkles.windows(2).all(|w| match w {
            [a, b] => a.timestamp <= b.timestamp,
            _ => true,
        }));
    }

    #[tokio::test]
    async fn failed_save_keeps_sparkle_in_memory() {
        let mut service = make_failing_service();
        let result = service.add_sparkle(NewSparkle::new("alice", "bob")).await;
        assert!(matches!(result, Err(SparkleError::Transport(_))));
        assert_eq!(service.store().len(), 1);
        assert_eq!(service.receivers(None), vec![Leader::new("bob", 1)]);
    }

    #[tokio::test]
    async fn load_restores_saved_store() {
        let (mut service, backend) = make_service();
        let reviewed = NewSparkle::new("alice", "bob").with_message("code review");
        assert!(service.add_sparkle(reviewed).await.is_ok());
        assert!(service.add_sparkle(NewSparkle::new("bob", "alice")).await.is_ok());

        let repo = SparkleRepository::new(backend, DEFAULT_KEY);
        let restored = SparkleService::load(repo).await;
        assert_eq!(restored.store(), service.store());
    }

    #[tokio::test]
    async fn load_from_unreachable_backend_starts_empty() {
        let repo = SparkleRepository::new(Arc::new(UnreachableBlobStore), DEFAULT_KEY);
        let service = SparkleService::load(repo).await;
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn migrate_and_save_persists_rewrite() {
        let (mut service, backend) = make_service();
        assert!(service.add_sparkle(NewSparkle::new("alice", "bob")).await.is_ok());
        assert!(service.add_sparkle(NewSparkle::new("carol", "BOB")).await.is_ok());
        assert!(service.add_sparkle(NewSparkle::new("bob", "dave")).await.is_ok());

        let Ok(moved) = service.migrate_and_save("bob", "Robert").await else {
            panic!("migrate failed");
        };
        assert_eq!(moved, 2);

        let reloaded = SparkleRepository::new(backend, DEFAULT_KEY).load().await;
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.leader_for_receiver("Robert", None).score, 2);
        assert_eq!(reloaded.sparkles_from_user("bob").len(), 1);
    }

    #[tokio::test]
    async fn migrate_without_matches_skips_save() {
        let mut service = make_failing_service();
        let result = service.migrate_and_save("ghost", "spirit").await;
        assert!(matches!(result, Ok(0)));
    }

    #[tokio::test]
    async fn top_received_ranks_descending() {
        let (mut service, _) = make_service();
        for receiver in ["bob", "carol", "bob", "dave", "bob", "carol"] {
            assert!(service.add_sparkle(NewSparkle::new("alice", receiver)).await.is_ok());
        }
        let top = service.top_received(None);
        let scores: Vec<u64> = top.iter().map(|l| l.score).collect();
        assert_eq!(scores, vec![3, 2, 1]);
        assert_eq!(top.first().map(|l| l.name.as_str()), Some("bob"));
        assert_eq!(service.top_given(None), vec![Leader::new("alice", 6)]);
        assert_eq!(service.sparkles_for_user("CAROL").len(), 2);
    }
}
