//! Outbound integrations used by handlers

pub mod email;
