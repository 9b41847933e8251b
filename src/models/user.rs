//! This file defines a user of the application and its supporting types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to
/// better compile time errors, and more flexible generics that can have
/// distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a user ID from a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw database ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// A user is created exactly once per unique external identity, on their
/// first successful sign-in (see [crate::authenticate]). Users author
/// expenses and participate in groups, but neither relation is stored on
/// this type; both are reached through the stores by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserID,
    external_auth_id: String,
    display_name: String,
}

impl User {
    /// Create a user.
    ///
    /// This is intended for store implementations mapping database rows back
    /// into users. To add a new user to the application, go through
    /// [crate::authenticate] or [crate::stores::UserStore::create].
    pub fn new(id: UserID, external_auth_id: String, display_name: String) -> Self {
        Self {
            id,
            external_auth_id,
            display_name,
        }
    }

    /// The user's ID in the database.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The stable subject identifier issued by the external identity provider.
    pub fn external_auth_id(&self) -> &str {
        &self.external_auth_id
    }

    /// The user's display name. May be empty.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
