//! Core use-case services.
//!
//! # Responsibility
//! - Turn decoded requests into record store calls plus business rules.
//! - Keep dispatch/response formatting decoupled from storage details.

pub mod user_service;
