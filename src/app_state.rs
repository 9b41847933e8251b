//! Implements a struct that bundles the stores the application core needs.

use crate::stores::{CategoryStore, ExpenseStore, GroupStore, SettingsStore, UserStore};

/// The state of the application core: one store per domain model, all
/// sharing a single underlying database.
///
/// For the SQLite-backed version of this type, see
/// [crate::stores::sqlite::create_app_state].
#[derive(Debug, Clone)]
pub struct AppState<C, E, G, S, U>
where
    C: CategoryStore,
    E: ExpenseStore,
    G: GroupStore,
    S: SettingsStore,
    U: UserStore,
{
    /// The store for expense categories.
    pub category_store: C,

    /// The store for expenses.
    pub expense_store: E,

    /// The store for groups and their membership.
    pub group_store: G,

    /// The store for process-wide settings, including the persisted session.
    pub settings_store: S,

    /// The store for users.
    pub user_store: U,
}

impl<C, E, G, S, U> AppState<C, E, G, S, U>
where
    C: CategoryStore,
    E: ExpenseStore,
    G: GroupStore,
    S: SettingsStore,
    U: UserStore,
{
    /// Create a new [AppState] from the given stores.
    pub fn new(
        category_store: C,
        expense_store: E,
        group_store: G,
        settings_store: S,
        user_store: U,
    ) -> Self {
        Self {
            category_store,
            expense_store,
            group_store,
            settings_store,
            user_store,
        }
    }
}
