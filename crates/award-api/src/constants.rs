//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Path of the served OpenAPI document, relative to [`API_PREFIX`]
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Message for a delivery request whose body is not a submission.
pub const MALFORMED_SUBMISSION_MESSAGE: &str = "잘못된 요청입니다.";
