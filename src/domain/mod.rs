//! Domain layer: sparkle events, leaderboard entries, and the record store.
//!
//! This module contains the in-memory model. Nothing here touches the
//! network; every leaderboard is a pure function of the stored sequence.

pub mod leader;
pub mod sparkle;
pub mod sparkle_store;

pub use leader::Leader;
pub use sparkle::{NewSparkle, Sparkle};
pub use sparkle_store::SparkleStore;
