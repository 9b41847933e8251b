//! This file defines a group of users that share expenses.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A newtype wrapper for integer group IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupID(i64);

impl GroupID {
    /// Create a group ID from a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw database ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for GroupID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A named collection of members and expenses.
///
/// Membership and the group's expenses are relations stored in the database,
/// not fields on this type: members live in a join table keyed by
/// `(group_id, user_id)` and expenses carry a `group_id` foreign key. Use
/// [crate::stores::GroupStore] to read either collection. A group owns its
/// expenses' lifecycle, whereas membership is a non-owning many-to-many
/// relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    id: GroupID,
    name: String,
}

impl Group {
    /// Create a group. Intended for store implementations mapping database
    /// rows; use [crate::stores::GroupStore::create] to add a new group.
    pub fn new(id: GroupID, name: String) -> Self {
        Self { id, name }
    }

    /// The group's ID in the database.
    pub fn id(&self) -> GroupID {
        self.id
    }

    /// The group's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
