//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{User, UserID},
    stores::UserStore,
};

/// Creates and retrieves users to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new user store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    ///
    /// Returns [Error::DuplicateExternalId] if `external_auth_id` is already
    /// taken, or [Error::SqlError] if an SQL related error occurred.
    fn create(&mut self, external_auth_id: &str, display_name: &str) -> Result<User, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO user (external_auth_id, display_name) VALUES (?1, ?2)",
            (external_auth_id, display_name),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User::new(
            id,
            external_auth_id.to_string(),
            display_name.to_string(),
        ))
    }

    /// Get the user from the database that has the specified `id`, or return
    /// [Error::NotFound] if no such user exists.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    fn get(&self, id: UserID) -> Result<User, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, external_auth_id, display_name FROM user WHERE id = :id")?
            .query_row(&[(":id", &id.as_i64())], SQLiteUserStore::map_row)
            .map_err(|error| error.into())
    }

    /// Get the user from the database that has the specified
    /// `external_auth_id`, or return [Error::NotFound] if no such user
    /// exists.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    fn get_by_external_id(&self, external_auth_id: &str) -> Result<User, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, external_auth_id, display_name FROM user
                WHERE external_auth_id = :external_auth_id",
            )?
            .query_row(
                &[(":external_auth_id", &external_auth_id)],
                SQLiteUserStore::map_row,
            )
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                external_auth_id TEXT UNIQUE NOT NULL,
                display_name TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let external_auth_id = row.get(offset + 1)?;
        let display_name = row.get(offset + 2)?;

        Ok(User::new(UserID::new(raw_id), external_auth_id, display_name))
    }
}

#[cfg(test)]
mod user_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, db::initialize, models::UserID};

    use super::{SQLiteUserStore, UserStore};

    fn get_test_store() -> SQLiteUserStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteUserStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_user_succeeds() {
        let mut store = get_test_store();

        let user = store.create("apple:123", "Alice").unwrap();

        assert!(user.id().as_i64() > 0);
        assert_eq!(user.external_auth_id(), "apple:123");
        assert_eq!(user.display_name(), "Alice");
    }

    #[test]
    fn create_user_allows_empty_display_name() {
        let mut store = get_test_store();

        let user = store.create("apple:123", "").unwrap();

        assert_eq!(user.display_name(), "");
    }

    #[test]
    fn create_user_fails_on_duplicate_external_id() {
        let mut store = get_test_store();

        assert!(store.create("apple:123", "Alice").is_ok());

        assert_eq!(
            store.create("apple:123", "Bob"),
            Err(Error::DuplicateExternalId)
        );
    }

    #[test]
    fn get_user_fails_with_non_existent_id() {
        let store = get_test_store();

        assert_eq!(store.get(UserID::new(42)), Err(Error::NotFound));
    }

    #[test]
    fn get_user_succeeds_with_existing_id() {
        let mut store = get_test_store();
        let inserted_user = store.create("apple:123", "Alice").unwrap();

        let retrieved_user = store.get(inserted_user.id()).unwrap();

        assert_eq!(retrieved_user, inserted_user);
    }

    #[test]
    fn get_user_by_external_id_succeeds() {
        let mut store = get_test_store();
        let inserted_user = store.create("apple:123", "Alice").unwrap();

        let retrieved_user = store.get_by_external_id("apple:123").unwrap();

        assert_eq!(retrieved_user, inserted_user);
    }

    #[test]
    fn get_user_by_external_id_fails_with_unknown_subject() {
        let store = get_test_store();

        assert_eq!(store.get_by_external_id("apple:999"), Err(Error::NotFound));
    }
}
