//! Defines the group store trait, including the membership operations.

use crate::{
    Error,
    models::{Expense, Group, GroupID, User, UserID},
};

/// Handles the creation and retrieval of groups and their membership.
///
/// A (group, user) membership pair is either a member or not; there are no
/// intermediate states. [GroupStore::add_member] moves the pair to member
/// and fails if it already is one, [GroupStore::remove_member] moves it back
/// and is a no-op if it already is not.
pub trait GroupStore {
    /// Create a new group with no members and no expenses.
    fn create(&mut self, name: &str) -> Result<Group, Error>;

    /// Get a group by its ID.
    fn get(&self, id: GroupID) -> Result<Group, Error>;

    /// Change the name of a group.
    ///
    /// Returns [Error::NotFound] if no group with the given ID exists.
    fn rename(&mut self, id: GroupID, name: &str) -> Result<(), Error>;

    /// Add the user with `user_id` to the group's member set.
    ///
    /// Returns [Error::UserNotFound] if the user ID does not refer to an
    /// existing user, and [Error::AlreadyMember] if the user is already in
    /// the group. In both cases the store is left unchanged.
    fn add_member(&mut self, group_id: GroupID, user_id: UserID) -> Result<(), Error>;

    /// Remove the user with `user_id` from the group's member set.
    ///
    /// Removing a user that is not a member is a no-op, not an error. The
    /// group's expenses are never touched: expenses authored by the removed
    /// member stay in the group.
    fn remove_member(&mut self, group_id: GroupID, user_id: UserID) -> Result<(), Error>;

    /// Get the members of a group, ordered by user ID.
    fn get_members(&self, group_id: GroupID) -> Result<Vec<User>, Error>;

    /// Get the expenses belonging to a group, newest first.
    fn get_expenses(&self, group_id: GroupID) -> Result<Vec<Expense>, Error>;
}
