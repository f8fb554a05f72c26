//! Closed failure taxonomy for user record operations.
//!
//! # Responsibility
//! - Name every failure the core can report to its callers.
//! - Give each failure a stable numeric code and a fixed message.
//!
//! # Invariants
//! - The set of kinds is closed; a new failure mode means a new variant.
//! - Errors are flat values: no nested causes, no wrapping chains.
//! - Codes never change once published (`1..=10`).

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UserResult<T> = Result<T, UserError>;

/// Failure kinds returned by the user record service and the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserError {
    /// The backend lookup or scan failed.
    FetchUserFailed,
    /// A raw body or stored item could not be decoded into a `User`.
    UnmarshalFailed,
    /// Reserved for payloads that decode but carry unusable data.
    InvalidUserData,
    /// The submitted email does not pass `is_email_valid`.
    InvalidEmail,
    /// A `User` could not be encoded into a store item.
    MarshalFailed,
    /// The backend delete failed.
    DeleteFailed,
    /// The backend put failed.
    StorePutFailed,
    /// Create found a record with the same email.
    UserAlreadyExists,
    /// Update (or fetch-one through the dispatcher) found no record.
    UserNotFound,
    /// The dispatcher received a method it does not route.
    MethodNotAllowed,
}

impl UserError {
    /// Every kind, in code order.
    pub const ALL: [Self; 10] = [
        Self::FetchUserFailed,
        Self::UnmarshalFailed,
        Self::InvalidUserData,
        Self::InvalidEmail,
        Self::MarshalFailed,
        Self::DeleteFailed,
        Self::StorePutFailed,
        Self::UserAlreadyExists,
        Self::UserNotFound,
        Self::MethodNotAllowed,
    ];

    /// Stable numeric code for this kind.
    pub fn code(self) -> u16 {
        match self {
            Self::FetchUserFailed => 1,
            Self::UnmarshalFailed => 2,
            Self::InvalidUserData => 3,
            Self::InvalidEmail => 4,
            Self::MarshalFailed => 5,
            Self::DeleteFailed => 6,
            Self::StorePutFailed => 7,
            Self::UserAlreadyExists => 8,
            Self::UserNotFound => 9,
            Self::MethodNotAllowed => 10,
        }
    }

    /// Fixed human-readable message for this kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::FetchUserFailed => "failed to fetch user record",
            Self::UnmarshalFailed => "failed to unmarshal record",
            Self::InvalidUserData => "invalid user data",
            Self::InvalidEmail => "invalid email",
            Self::MarshalFailed => "could not marshal item",
            Self::DeleteFailed => "could not delete item",
            Self::StorePutFailed => "could not put item",
            Self::UserAlreadyExists => "user already exists",
            Self::UserNotFound => "user does not exist",
            Self::MethodNotAllowed => "method not allowed",
        }
    }

    /// Short snake_case tag used in log lines.
    pub fn log_code(self) -> &'static str {
        match self {
            Self::FetchUserFailed => "fetch_user_failed",
            Self::UnmarshalFailed => "unmarshal_failed",
            Self::InvalidUserData => "invalid_user_data",
            Self::InvalidEmail => "invalid_email",
            Self::MarshalFailed => "marshal_failed",
            Self::DeleteFailed => "delete_failed",
            Self::StorePutFailed => "store_put_failed",
            Self::UserAlreadyExists => "user_already_exists",
            Self::UserNotFound => "user_not_found",
            Self::MethodNotAllowed => "method_not_allowed",
        }
    }
}

impl Display for UserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "code: {}, message: {}", self.code(), self.message())
    }
}

impl Error for UserError {}
