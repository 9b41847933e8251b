//! Defines traits for mapping the domain models to and from the database,
//! and the function that initializes the database schema.

use rusqlite::{Connection, Row, Transaction as SqlTransaction};

use crate::{
    Error,
    stores::sqlite::{
        SQLiteCategoryStore, SQLiteExpenseStore, SQLiteGroupStore, SQLiteSettingsStore,
        SQLiteUserStore,
    },
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table(s) for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    /// The type that the row is mapped to.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the
    /// table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, reading from the column `offset`.
    ///
    /// This is useful when tables have been joined and you want to construct
    /// two different types from the one query.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the tables for the domain models in the database.
///
/// Table creation runs inside a single exclusive transaction, so the schema
/// is either fully created or not at all. Safe to call on every launch since
/// the tables are created with `IF NOT EXISTS`.
///
/// # Errors
/// Returns an error if the transaction could not be committed or there was an
/// SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SQLiteUserStore::create_table(&transaction)?;
    SQLiteCategoryStore::create_table(&transaction)?;
    SQLiteGroupStore::create_table(&transaction)?;
    SQLiteExpenseStore::create_table(&transaction)?;
    SQLiteSettingsStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
                ('user', 'category', 'user_group', 'membership', 'expense', 'settings')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 6);
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        assert_eq!(initialize(&conn), Ok(()));
    }
}
