//! This file defines an expense record and the data needed to create one.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::{Amount, DatabaseID, GroupID, UserID};

/// A monetary transaction logged by a user.
///
/// The author, group, and category are all foreign-key references rather
/// than embedded objects. Each is optional: an expense whose author was
/// deleted keeps a `None` author (a soft orphan) instead of being
/// cascade-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: DatabaseID,
    name: String,
    amount: Amount,
    author_id: Option<UserID>,
    group_id: Option<GroupID>,
    category_id: Option<DatabaseID>,
    is_completed: bool,
    status: String,
    timestamp: OffsetDateTime,
}

impl Expense {
    /// Create an expense.
    ///
    /// This is intended for store implementations mapping database rows back
    /// into expenses. To record a new expense, use
    /// [crate::stores::ExpenseStore::create].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: DatabaseID,
        name: String,
        amount: Amount,
        author_id: Option<UserID>,
        group_id: Option<GroupID>,
        category_id: Option<DatabaseID>,
        is_completed: bool,
        status: String,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name,
            amount,
            author_id,
            group_id,
            category_id,
            is_completed,
            status,
            timestamp,
        }
    }

    /// The expense's ID in the database.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// A short description of what the expense was for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How much was spent, in cents.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// The user that logged the expense, if they still exist.
    pub fn author_id(&self) -> Option<UserID> {
        self.author_id
    }

    /// The group the expense belongs to, if any.
    pub fn group_id(&self) -> Option<GroupID> {
        self.group_id
    }

    /// The category the expense is tagged with, if any.
    pub fn category_id(&self) -> Option<DatabaseID> {
        self.category_id
    }

    /// Whether the expense has been marked as completed.
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Free-text state set by the user, e.g., "pending reimbursement".
    pub fn status(&self) -> &str {
        &self.status
    }

    /// When the expense was created. Immutable after creation.
    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

/// The data needed to create a new expense.
///
/// The completion flag and creation timestamp are not part of this type:
/// new expenses always start incomplete, and the store stamps the creation
/// instant when the record is inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// A short description of what the expense was for.
    pub name: String,
    /// How much was spent, in cents.
    pub amount: Amount,
    /// The user logging the expense.
    pub author_id: Option<UserID>,
    /// The group the expense belongs to.
    pub group_id: Option<GroupID>,
    /// The category to tag the expense with.
    pub category_id: Option<DatabaseID>,
    /// Free-text state set by the user.
    pub status: String,
}
