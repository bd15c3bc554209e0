//! # sparkle-board
//!
//! Peer-recognition "sparkle" tracker with giver and receiver leaderboards.
//!
//! Every sparkle ever given lives in one in-memory sequence. Leaderboards
//! are recomputed from that sequence on each query, and the whole
//! sequence is written back to a single object-store blob after every
//! award.
//!
//! ## Architecture
//!
//! ```text
//! Callers (chat bot, admin tooling)
//!     │
//!     ├── SparkleService (service/)
//!     │
//!     ├── SparkleStore (domain/)        ← queries & aggregation
//!     │
//!     ├── SparkleRepository (persistence/)
//!     ├── codec (bincode blob)
//!     │
//!     └── BlobStore: S3 / in-memory
//! ```

pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
