//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, Transaction as SqlTransaction};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryTitle, DatabaseID},
    stores::{CategoryStore, DEFAULT_CATEGORIES},
};

/// Creates and retrieves expense categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// Returns [Error::DuplicateTitle] if a category with the same title
    /// already exists, or [Error::SqlError] if there is some other SQL
    /// error.
    fn create(&self, title: CategoryTitle) -> Result<Category, Error> {
        let connection = self.connection.lock().unwrap();
        connection.execute(
            "INSERT INTO category (title) VALUES (?1);",
            (title.as_ref(),),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category::new(id, title))
    }

    /// Retrieve the category with `category_id` from the database.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, title FROM category WHERE id = :id;")?
            .query_row(&[(":id", &category_id)], SQLiteCategoryStore::map_row)
            .map_err(|error| error.into())
    }

    /// Retrieve all categories in the database, in insertion order.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, title FROM category ORDER BY id;")?
            .query_map([], SQLiteCategoryStore::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// Insert the [DEFAULT_CATEGORIES] if the table is empty.
    ///
    /// The count check and the inserts run under the same connection lock
    /// and inside one SQL transaction: either all three defaults are
    /// inserted or none are. An error therefore leaves the table empty, so
    /// retrying the whole operation seeds it afresh.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn seed_defaults(&self) -> Result<Vec<Category>, Error> {
        let connection = self.connection.lock().unwrap();
        let transaction =
            SqlTransaction::new_unchecked(&connection, rusqlite::TransactionBehavior::Deferred)?;

        let count: i64 = transaction.query_row("SELECT COUNT(*) FROM category;", [], |row| {
            row.get(0)
        })?;

        if count > 0 {
            return Ok(Vec::new());
        }

        let mut seeded = Vec::with_capacity(DEFAULT_CATEGORIES.len());

        for title in DEFAULT_CATEGORIES {
            transaction.execute("INSERT INTO category (title) VALUES (?1);", (title,))?;
            seeded.push(Category::new(
                transaction.last_insert_rowid(),
                CategoryTitle::new_unchecked(title),
            ));
        }

        transaction.commit()?;

        tracing::info!("seeded {} default categories", seeded.len());

        Ok(seeded)
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL UNIQUE
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_title: String = row.get(offset + 1)?;
        let title = CategoryTitle::new_unchecked(&raw_title);

        Ok(Category::new(id, title))
    }
}
