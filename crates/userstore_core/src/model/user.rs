//! User domain model.
//!
//! # Responsibility
//! - Define the canonical `User` record and its serialized field names.
//! - Convert between `User` and raw store items.
//!
//! # Invariants
//! - Wire/storage keys are `email`, `firstname`, `lastname`.
//! - Absent fields decode to empty strings, so an empty item decodes to
//!   `User::default()`.
//! - Decoding matches keys case-insensitively, treats `null` as "leave
//!   unchanged", and applies keys in document order (last duplicate wins).
//! - Non-string, non-null values for known keys are rejected.

use crate::store::Item;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Formatter;

/// Canonical user record. `email` is the primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    pub email: String,
    /// Serialized as `firstname`; any casing is accepted on input.
    #[serde(rename = "firstname")]
    pub first_name: String,
    /// Serialized as `lastname`; any casing is accepted on input.
    #[serde(rename = "lastname")]
    pub last_name: String,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Returns whether this value denotes a stored record.
    ///
    /// Lookups return a zero-value `User` instead of a not-found signal.
    pub fn exists(&self) -> bool {
        !self.email.is_empty()
    }

    /// Decodes a raw store item.
    pub fn from_item(item: Item) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(item))
    }

    /// Encodes this user as a raw store item.
    pub fn to_item(&self) -> Result<Item, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(item) => Ok(item),
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "user encoded as non-object json value `{other}`"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UserVisitor)
    }
}

struct UserVisitor;

impl<'de> Visitor<'de> for UserVisitor {
    type Value = User;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a user object with string fields")
    }

    // A top-level `null` leaves every field at its zero value.
    fn visit_unit<E: de::Error>(self) -> Result<User, E> {
        Ok(User::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<User, A::Error> {
        let mut user = User::default();
        while let Some(key) = map.next_key::<String>()? {
            let slot = if key.eq_ignore_ascii_case("email") {
                &mut user.email
            } else if key.eq_ignore_ascii_case("firstname") {
                &mut user.first_name
            } else if key.eq_ignore_ascii_case("lastname") {
                &mut user.last_name
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            if let Some(value) = map.next_value::<Option<String>>()? {
                *slot = value;
            }
        }
        Ok(user)
    }
}
