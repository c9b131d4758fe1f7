//! Impact Award API Library
//!
//! HTTP handlers, error mapping, and application setup for the recommendation
//! form backend and the delivery endpoint.

mod api_doc;
pub mod constants;
mod handlers;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use api_doc::ApiDoc;
pub use error::{ErrorResponse, HttpAppError};
pub use services::email::{EmailService, MailError, Mailer};
pub use state::AppState;
