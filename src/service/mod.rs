//! Service layer: sparkle recording orchestration.
//!
//! [`SparkleService`] couples the in-memory [`crate::domain::SparkleStore`]
//! with the [`crate::persistence::SparkleRepository`] so that every award
//! is followed by a full save.

pub mod sparkle_service;

pub use sparkle_service::SparkleService;
