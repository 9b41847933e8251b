//! This module defines the domain data types.

pub use amount::Amount;
pub use category::{Category, CategoryTitle};
pub use expense::{Expense, NewExpense};
pub use group::{Group, GroupID};
pub use user::{User, UserID};

mod amount;
mod category;
mod expense;
mod group;
mod user;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
