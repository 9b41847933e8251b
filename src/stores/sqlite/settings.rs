//! Implements a SQLite backed key-value settings store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, Transaction as SqlTransaction};

use crate::{Error, db::CreateTable, stores::SettingsStore};

/// Stores process-wide settings as key-value pairs in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteSettingsStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteSettingsStore {
    /// Create a new settings store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl SettingsStore for SQLiteSettingsStore {
    /// Get the value stored under `key`, or `None` if the key has never been
    /// set.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                (key,),
                |row| row.get(0),
            )
            .optional()
            .map_err(|error| error.into())
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.lock().unwrap().execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }

    /// Store several key-value pairs inside one SQL transaction.
    ///
    /// If any statement fails, every pair written so far is rolled back, so
    /// related keys can never be observed out of step with each other.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn set_many(&mut self, pairs: &[(&str, &str)]) -> Result<(), Error> {
        let connection = self.connection.lock().unwrap();
        let transaction =
            SqlTransaction::new_unchecked(&connection, rusqlite::TransactionBehavior::Deferred)?;

        for (key, value) in pairs {
            transaction.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                ON CONFLICT (key) DO UPDATE SET value = excluded.value",
                (key, value),
            )?;
        }

        transaction.commit()?;

        Ok(())
    }
}

impl CreateTable for SQLiteSettingsStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod settings_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::db::initialize;

    use super::{SQLiteSettingsStore, SettingsStore};

    fn get_test_store() -> SQLiteSettingsStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteSettingsStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn get_unset_key_returns_none() {
        let store = get_test_store();

        assert_eq!(store.get("userID"), Ok(None));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = get_test_store();

        store.set("userID", "42").unwrap();

        assert_eq!(store.get("userID"), Ok(Some("42".to_string())));
    }

    #[test]
    fn set_many_stores_all_pairs() {
        let mut store = get_test_store();

        store
            .set_many(&[("userID", "42"), ("name", "Alice")])
            .unwrap();

        assert_eq!(store.get("userID"), Ok(Some("42".to_string())));
        assert_eq!(store.get("name"), Ok(Some("Alice".to_string())));
    }

    #[test]
    fn set_many_rolls_back_all_pairs_on_failure() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));
        let mut store = SQLiteSettingsStore::new(connection.clone());

        // Make the write of the second key fail to simulate a persistence
        // error partway through the operation.
        connection
            .lock()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_name_key BEFORE INSERT ON settings
                WHEN NEW.key = 'name'
                BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
            )
            .unwrap();

        assert!(store.set_many(&[("userID", "42"), ("name", "Alice")]).is_err());

        // The first pair must not be observable on its own.
        assert_eq!(store.get("userID"), Ok(None));
        assert_eq!(store.get("name"), Ok(None));
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut store = get_test_store();

        store.set("name", "Alice").unwrap();
        store.set("name", "Bob").unwrap();

        assert_eq!(store.get("name"), Ok(Some("Bob".to_string())));
    }
}
