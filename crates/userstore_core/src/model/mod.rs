//! Domain model for the user record store.
//!
//! # Responsibility
//! - Define the single persisted entity and its wire/storage shapes.
//!
//! # Invariants
//! - `User::email` is the sole key of a stored record.
//! - An empty `email` means "no record" (zero-value lookup result).

pub mod user;
