//! Impact Award Storage Library
//!
//! Persistence for drafts and submissions. Two layers:
//!
//! - [`KeyValueStore`]: raw bytes under string keys, implemented by the local
//!   filesystem backend and an in-memory backend.
//! - [`RecommendationStore`]: the draft slot and the append-only submission log,
//!   stored as JSON on top of any key-value backend.
//!
//! # Storage keys
//!
//! The draft lives under `impact_award_draft` and the submission log under
//! `impact_award_submissions`. Keys must not contain `..`, path separators or a
//! leading `.`; validation is centralized in the `keys` module.

pub mod factory;
pub mod gateway;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use award_core::StorageBackend;
pub use factory::create_storage;
pub use gateway::{JsonRecommendationStore, RecommendationStore};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use traits::{KeyValueStore, StorageError, StorageResult};
