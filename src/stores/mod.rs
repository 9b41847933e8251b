//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).

mod category;
mod expense;
mod group;
mod settings;
mod user;

pub mod sqlite;

pub use category::{CategoryStore, DEFAULT_CATEGORIES};
pub use expense::ExpenseStore;
pub use group::GroupStore;
pub use settings::SettingsStore;
pub use user::UserStore;
