//! Impact Award Core Library
//!
//! This crate provides the domain models, validation rules, receipt numbers,
//! email composition, error types, and configuration shared by every Impact
//! Award component.

pub mod config;
pub mod constants;
pub mod email;
pub mod error;
pub mod models;
pub mod receipt;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{AwardConfig, BaseConfig, Config};
pub use email::{build_email, validate_smtp_config, EmailContent, SmtpConfigCheck};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    DeliveryResponse, EvidenceFile, RecommendationData, RequiredField, Submission,
    DELIVERY_FAILED_MESSAGE,
};
pub use receipt::{create_receipt_number, issue_receipt_number};
pub use storage_types::StorageBackend;
