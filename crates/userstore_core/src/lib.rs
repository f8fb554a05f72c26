//! Core record-access logic for the user store.
//! This crate owns validation, existence rules and the failure taxonomy;
//! callers only decode requests and format responses.

pub mod db;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod validators;

pub use error::{UserError, UserResult};
pub use handlers::{handle_request, ErrorBody, Method, Request, Response};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::user::User;
pub use service::user_service::UserService;
pub use store::{Item, RecordStore, SqliteRecordStore, StoreError, StoreResult};
pub use validators::is_email_valid;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
