//! Contains the SQLite-backed store implementations and a convenience
//! function for building an [AppState] that uses them.

pub mod category;
pub mod expense;
pub mod group;
pub mod settings;
pub mod user;

pub use category::SQLiteCategoryStore;
pub use expense::SQLiteExpenseStore;
pub use group::SQLiteGroupStore;
pub use settings::SQLiteSettingsStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize, stores::CategoryStore};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<
    SQLiteCategoryStore,
    SQLiteExpenseStore,
    SQLiteGroupStore,
    SQLiteSettingsStore,
    SQLiteUserStore,
>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the
/// domain models, and seeds the default expense categories if the database
/// holds none yet.
pub fn create_app_state(db_connection: Connection) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let category_store = SQLiteCategoryStore::new(connection.clone());
    let expense_store = SQLiteExpenseStore::new(connection.clone());
    let group_store = SQLiteGroupStore::new(connection.clone());
    let settings_store = SQLiteSettingsStore::new(connection.clone());
    let user_store = SQLiteUserStore::new(connection.clone());

    category_store.seed_defaults()?;

    Ok(AppState::new(
        category_store,
        expense_store,
        group_store,
        settings_store,
        user_store,
    ))
}
