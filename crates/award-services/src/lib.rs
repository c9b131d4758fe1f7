//! Impact Award Services Layer
//!
//! Orchestration on top of the domain rules in `award-core` and the
//! persistence in `award-storage`: the submission workflow, debounced draft
//! autosave, and the client that hands a finished submission to the delivery
//! endpoint. The HTTP and CLI surfaces depend on this crate only for
//! workflow logic; keep transport concerns out of it.

pub mod autosave;
pub mod delivery;
pub mod recommendation;

#[cfg(test)]
pub(crate) mod test_support;

pub use autosave::{AutosaveStatus, DraftAutosaver};
pub use delivery::{DeliveryClient, DeliveryError};
pub use recommendation::{RecommendationService, SubmissionError, SubmissionReceipt};

pub use award_core::{DeliveryResponse, EvidenceFile, RecommendationData, Submission};
pub use award_storage::{create_storage, RecommendationStore, StorageBackend, StorageError};
