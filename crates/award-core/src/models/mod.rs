//! Domain models

pub mod delivery;
pub mod recommendation;
pub mod submission;

pub use delivery::{DeliveryResponse, DELIVERY_FAILED_MESSAGE};
pub use recommendation::{EvidenceFile, RecommendationData, RequiredField};
pub use submission::Submission;
