//! Defines the expense store trait.

use crate::{
    Error,
    models::{DatabaseID, Expense, NewExpense},
};

/// Handles the creation, mutation, and retrieval of expenses.
pub trait ExpenseStore {
    /// Record a new expense in the store.
    ///
    /// The expense starts incomplete and is stamped with the creation
    /// instant.
    fn create(&mut self, expense: NewExpense) -> Result<Expense, Error>;

    /// Retrieve an expense from the store.
    fn get(&self, id: DatabaseID) -> Result<Expense, Error>;

    /// Flip the completion flag of an expense and return the updated record.
    ///
    /// Returns [Error::NotFound] if no expense with the given ID exists.
    fn toggle_completion(&mut self, id: DatabaseID) -> Result<Expense, Error>;

    /// Delete an expense from the store.
    ///
    /// Group and category references live on the expense row itself, so
    /// deleting the row leaves no dangling references behind.
    ///
    /// Returns [Error::NotFound] if no expense with the given ID exists.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;

    /// Retrieve the expenses that have not been completed, newest first.
    ///
    /// Each call queries the store afresh, so the result always reflects
    /// live state rather than a frozen snapshot.
    fn active(&self) -> Result<Vec<Expense>, Error>;
}
