//! User record use-case service.
//!
//! # Responsibility
//! - Validate, encode and persist `User` records through a `RecordStore`.
//! - Enforce existence rules: no duplicate create, no update of a missing
//!   record.
//! - Report every failure as one `UserError` kind.
//!
//! # Invariants
//! - The service holds no mutable state; `table_name` and the store are the
//!   only dependencies and may equally be passed per call.
//! - Update is a full overwrite of the decoded payload, never a merge.
//! - Delete is idempotent and performs no existence check.
//! - Logs carry metadata only; emails and bodies are never written.
//!
//! # Known limitations
//! - The existence check and the following put are not atomic, so two
//!   concurrent creates for one email can both succeed (last write wins).
//! - Create and Update ignore a failing existence check. For Create this
//!   reads as "not found"; for Update the put proceeds. The failure is only
//!   visible as a `warn` line.

use crate::error::{UserError, UserResult};
use crate::model::user::User;
use crate::store::RecordStore;
use crate::validators::is_email_valid;
use log::{debug, error, warn};

const MODULE: &str = "user_service";

/// Service facade binding a record store to one collection.
pub struct UserService<S: RecordStore> {
    store: S,
    table_name: String,
}

impl<S: RecordStore> UserService<S> {
    /// Creates a service over `store` for collection `table_name`.
    pub fn new(store: S, table_name: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table_name.into(),
        }
    }

    /// Returns the collection this service reads and writes.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Fetches one user by email. See [`fetch_user`].
    pub fn fetch_user(&self, email: &str) -> UserResult<User> {
        fetch_user(email, &self.table_name, &self.store)
    }

    /// Fetches every user in the collection. See [`fetch_users`].
    pub fn fetch_users(&self) -> UserResult<Vec<User>> {
        fetch_users(&self.table_name, &self.store)
    }

    /// Creates a user from a JSON body. See [`create_user`].
    pub fn create_user(&self, raw_body: &str) -> UserResult<User> {
        create_user(raw_body, &self.table_name, &self.store)
    }

    /// Overwrites an existing user from a JSON body. See [`update_user`].
    pub fn update_user(&self, raw_body: &str) -> UserResult<User> {
        update_user(raw_body, &self.table_name, &self.store)
    }

    /// Deletes a user by email. See [`delete_user`].
    pub fn delete_user(&self, email: &str) -> UserResult<()> {
        delete_user(email, &self.table_name, &self.store)
    }
}

/// Looks up one user by email.
///
/// A missing record is not an error: the returned `User` has an empty
/// `email`, and callers decide what "not found" means.
///
/// # Errors
/// - `FetchUserFailed` when the backend lookup fails.
/// - `UnmarshalFailed` when the stored item does not decode into a `User`.
pub fn fetch_user<S: RecordStore>(email: &str, table_name: &str, store: &S) -> UserResult<User> {
    let item = store.get_item(table_name, email).map_err(|err| {
        error!("event=user_fetch module={MODULE} status=error error_code=fetch_user_failed error={err}");
        UserError::FetchUserFailed
    })?;

    let user = User::from_item(item.unwrap_or_default()).map_err(|err| {
        error!("event=user_fetch module={MODULE} status=error error_code=unmarshal_failed error={err}");
        UserError::UnmarshalFailed
    })?;

    debug!(
        "event=user_fetch module={MODULE} status=ok found={}",
        user.exists()
    );
    Ok(user)
}

/// Scans the whole collection.
///
/// Order is whatever the store returns.
///
/// # Errors
/// - `FetchUserFailed` when the backend scan fails.
/// - `UnmarshalFailed` when any stored item does not decode into a `User`.
pub fn fetch_users<S: RecordStore>(table_name: &str, store: &S) -> UserResult<Vec<User>> {
    let items = store.scan(table_name).map_err(|err| {
        error!("event=user_scan module={MODULE} status=error error_code=fetch_user_failed error={err}");
        UserError::FetchUserFailed
    })?;

    let users = items
        .into_iter()
        .map(User::from_item)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| {
            error!("event=user_scan module={MODULE} status=error error_code=unmarshal_failed error={err}");
            UserError::UnmarshalFailed
        })?;

    debug!(
        "event=user_scan module={MODULE} status=ok count={}",
        users.len()
    );
    Ok(users)
}

/// Creates a new user from a JSON body.
///
/// Returns the decoded user unchanged on success.
///
/// # Errors
/// - `UnmarshalFailed` when the body is not a `User` document.
/// - `InvalidEmail` when the email fails `is_email_valid`.
/// - `UserAlreadyExists` when a record with this email is present.
/// - `MarshalFailed` / `StorePutFailed` from the write path.
pub fn create_user<S: RecordStore>(raw_body: &str, table_name: &str, store: &S) -> UserResult<User> {
    let user = decode_body(raw_body, "user_create")?;

    if !is_email_valid(&user.email) {
        return Err(fail("user_create", UserError::InvalidEmail));
    }

    if check_existing(&user.email, table_name, store, "user_create").is_some_and(|u| u.exists()) {
        return Err(fail("user_create", UserError::UserAlreadyExists));
    }

    persist(&user, table_name, store, "user_create")?;
    debug!("event=user_create module={MODULE} status=ok");
    Ok(user)
}

/// Replaces an existing user with the decoded JSON body.
///
/// Fields absent from the body are stored as empty strings. The email format
/// is not validated here.
///
/// # Errors
/// - `UnmarshalFailed` when the body is not a `User` document.
/// - `UserNotFound` when the existence check finds no record with this email.
/// - `MarshalFailed` / `StorePutFailed` from the write path.
pub fn update_user<S: RecordStore>(raw_body: &str, table_name: &str, store: &S) -> UserResult<User> {
    let user = decode_body(raw_body, "user_update")?;

    if check_existing(&user.email, table_name, store, "user_update").is_some_and(|u| !u.exists()) {
        return Err(fail("user_update", UserError::UserNotFound));
    }

    persist(&user, table_name, store, "user_update")?;
    debug!("event=user_update module={MODULE} status=ok");
    Ok(user)
}

/// Deletes the record keyed by `email`. Absent keys are not an error.
///
/// # Errors
/// - `DeleteFailed` when the backend delete fails.
pub fn delete_user<S: RecordStore>(email: &str, table_name: &str, store: &S) -> UserResult<()> {
    store.delete_item(table_name, email).map_err(|err| {
        error!("event=user_delete module={MODULE} status=error error_code=delete_failed error={err}");
        UserError::DeleteFailed
    })?;
    debug!("event=user_delete module={MODULE} status=ok");
    Ok(())
}

fn decode_body(raw_body: &str, event: &str) -> UserResult<User> {
    serde_json::from_str::<User>(raw_body).map_err(|err| {
        warn!(
            "event={event} module={MODULE} status=error error_code=unmarshal_failed line={} column={}",
            err.line(),
            err.column()
        );
        UserError::UnmarshalFailed
    })
}

// `None` means the lookup itself failed.
fn check_existing<S: RecordStore>(
    email: &str,
    table_name: &str,
    store: &S,
    event: &str,
) -> Option<User> {
    match fetch_user(email, table_name, store) {
        Ok(user) => Some(user),
        Err(err) => {
            warn!(
                "event={event} module={MODULE} status=existence_check_ignored error_code={}",
                err.log_code()
            );
            None
        }
    }
}

fn persist<S: RecordStore>(user: &User, table_name: &str, store: &S, event: &str) -> UserResult<()> {
    let item = user.to_item().map_err(|err| {
        error!("event={event} module={MODULE} status=error error_code=marshal_failed error={err}");
        UserError::MarshalFailed
    })?;

    store
        .put_item(table_name, &user.email, &item)
        .map_err(|err| {
            error!("event={event} module={MODULE} status=error error_code=store_put_failed error={err}");
            UserError::StorePutFailed
        })
}

fn fail(event: &str, kind: UserError) -> UserError {
    warn!(
        "event={event} module={MODULE} status=rejected error_code={}",
        kind.log_code()
    );
    kind
}
