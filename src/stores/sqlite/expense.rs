//! Implements a SQLite backed expense store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Amount, DatabaseID, Expense, GroupID, NewExpense, UserID},
    stores::ExpenseStore,
};

/// Creates, mutates, and retrieves expenses to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new expense store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    /// Record a new expense in the database.
    ///
    /// The expense starts incomplete and its timestamp is set to the current
    /// instant (UTC).
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn create(&mut self, expense: NewExpense) -> Result<Expense, Error> {
        let timestamp = OffsetDateTime::now_utc();
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO expense (name, amount, author_id, group_id, category_id, status, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                &expense.name,
                expense.amount.as_cents(),
                expense.author_id.map(|id| id.as_i64()),
                expense.group_id.map(|id| id.as_i64()),
                expense.category_id,
                &expense.status,
                &timestamp,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Expense::new(
            id,
            expense.name,
            expense.amount,
            expense.author_id,
            expense.group_id,
            expense.category_id,
            false,
            expense.status,
            timestamp,
        ))
    }

    /// Get the expense from the database that has the specified `id`, or
    /// return [Error::NotFound] if no such expense exists.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    fn get(&self, id: DatabaseID) -> Result<Expense, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, amount, author_id, group_id, category_id, is_completed, status, timestamp
                FROM expense WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], SQLiteExpenseStore::map_row)
            .map_err(|error| error.into())
    }

    /// Flip the completion flag of the expense with `id` and return the
    /// updated record.
    ///
    /// The update and the re-read run under the same connection lock, so the
    /// returned record cannot be stale.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense with `id` exists.
    fn toggle_completion(&mut self, id: DatabaseID) -> Result<Expense, Error> {
        let connection = self.connection.lock().unwrap();

        let rows_updated = connection.execute(
            "UPDATE expense SET is_completed = NOT is_completed WHERE id = ?1",
            (id,),
        )?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        connection
            .prepare(
                "SELECT id, name, amount, author_id, group_id, category_id, is_completed, status, timestamp
                FROM expense WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], SQLiteExpenseStore::map_row)
            .map_err(|error| error.into())
    }

    /// Delete the expense with `id` from the database.
    ///
    /// The group and category references live on the expense row, so the
    /// single row deletion also detaches the expense from its group and
    /// category.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense with `id` exists.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM expense WHERE id = ?1", (id,))?;

        if rows_deleted == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    /// Retrieve the incomplete expenses, newest first.
    ///
    /// Ties on the creation instant are broken by ID, so expenses created
    /// within the same instant still come back latest-created first.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn active(&self) -> Result<Vec<Expense>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, amount, author_id, group_id, category_id, is_completed, status, timestamp
                FROM expense WHERE is_completed = 0
                ORDER BY timestamp DESC, id DESC",
            )?
            .query_map([], SQLiteExpenseStore::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SQLiteExpenseStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                amount INTEGER NOT NULL,
                author_id INTEGER REFERENCES user(id) ON DELETE SET NULL,
                group_id INTEGER REFERENCES user_group(id),
                category_id INTEGER REFERENCES category(id),
                is_completed INTEGER NOT NULL DEFAULT 0,
                status TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteExpenseStore {
    type ReturnType = Expense;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let name = row.get(offset + 1)?;
        let amount = Amount::new_unchecked(row.get(offset + 2)?);
        let author_id: Option<i64> = row.get(offset + 3)?;
        let group_id: Option<i64> = row.get(offset + 4)?;
        let category_id = row.get(offset + 5)?;
        let is_completed = row.get(offset + 6)?;
        let status = row.get(offset + 7)?;
        let timestamp = row.get(offset + 8)?;

        Ok(Expense::new(
            id,
            name,
            amount,
            author_id.map(UserID::new),
            group_id.map(GroupID::new),
            category_id,
            is_completed,
            status,
            timestamp,
        ))
    }
}

#[cfg(test)]
mod expense_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{Amount, NewExpense},
        stores::{UserStore, sqlite::SQLiteUserStore},
    };

    use super::{ExpenseStore, SQLiteExpenseStore};

    fn new_expense(name: &str, amount_cents: i64) -> NewExpense {
        NewExpense {
            name: name.to_string(),
            amount: Amount::new(amount_cents).unwrap(),
            author_id: None,
            group_id: None,
            category_id: None,
            status: "incomplete".to_string(),
        }
    }

    fn get_test_store() -> (SQLiteExpenseStore, Arc<Mutex<Connection>>) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        (SQLiteExpenseStore::new(connection.clone()), connection)
    }

    #[test]
    fn create_expense_starts_incomplete() {
        let (mut store, _) = get_test_store();

        let expense = store.create(new_expense("Lunch", 500)).unwrap();

        assert!(expense.id() > 0);
        assert_eq!(expense.name(), "Lunch");
        assert_eq!(expense.amount().as_cents(), 500);
        assert!(!expense.is_completed());
        assert_eq!(expense.status(), "incomplete");
    }

    #[test]
    fn get_expense_round_trips_fields() {
        let (mut store, _) = get_test_store();
        let inserted = store.create(new_expense("Lunch", 500)).unwrap();

        let fetched = store.get(inserted.id()).unwrap();

        assert_eq!(fetched.id(), inserted.id());
        assert_eq!(fetched.name(), inserted.name());
        assert_eq!(fetched.amount(), inserted.amount());
        assert_eq!(fetched.author_id(), inserted.author_id());
        assert_eq!(fetched.group_id(), inserted.group_id());
        assert_eq!(fetched.is_completed(), inserted.is_completed());
        assert_eq!(fetched.status(), inserted.status());
    }

    #[test]
    fn get_expense_fails_with_non_existent_id() {
        let (store, _) = get_test_store();

        assert_eq!(store.get(42), Err(Error::NotFound));
    }

    #[test]
    fn toggle_completion_flips_the_flag() {
        let (mut store, _) = get_test_store();
        let expense = store.create(new_expense("Lunch", 500)).unwrap();

        let toggled = store.toggle_completion(expense.id()).unwrap();
        assert!(toggled.is_completed());

        let toggled_back = store.toggle_completion(expense.id()).unwrap();
        assert!(!toggled_back.is_completed());
    }

    #[test]
    fn toggle_completion_fails_with_non_existent_id() {
        let (mut store, _) = get_test_store();

        assert_eq!(store.toggle_completion(42), Err(Error::NotFound));
    }

    #[test]
    fn delete_expense_removes_the_record() {
        let (mut store, _) = get_test_store();
        let expense = store.create(new_expense("Lunch", 500)).unwrap();

        store.delete(expense.id()).unwrap();

        assert_eq!(store.get(expense.id()), Err(Error::NotFound));
    }

    #[test]
    fn delete_expense_fails_with_non_existent_id() {
        let (mut store, _) = get_test_store();

        assert_eq!(store.delete(42), Err(Error::NotFound));
    }

    #[test]
    fn active_lists_newest_first() {
        let (mut store, _) = get_test_store();
        let first = store.create(new_expense("First", 100)).unwrap();
        let second = store.create(new_expense("Second", 200)).unwrap();
        let third = store.create(new_expense("Third", 300)).unwrap();

        let active_ids: Vec<i64> = store
            .active()
            .unwrap()
            .iter()
            .map(|expense| expense.id())
            .collect();

        assert_eq!(active_ids, vec![third.id(), second.id(), first.id()]);
    }

    #[test]
    fn active_excludes_completed_expenses() {
        let (mut store, _) = get_test_store();
        let lunch = store.create(new_expense("Lunch", 500)).unwrap();

        store.toggle_completion(lunch.id()).unwrap();

        assert!(store.active().unwrap().is_empty());
    }

    #[test]
    fn active_reflects_live_state_on_requery() {
        let (mut store, _) = get_test_store();
        let lunch = store.create(new_expense("Lunch", 500)).unwrap();

        assert_eq!(store.active().unwrap().len(), 1);

        store.delete(lunch.id()).unwrap();

        assert!(store.active().unwrap().is_empty());
    }

    #[test]
    fn deleting_author_leaves_soft_orphan() {
        let (mut store, connection) = get_test_store();
        let mut user_store = SQLiteUserStore::new(connection.clone());
        let author = user_store.create("apple:123", "Alice").unwrap();

        let mut expense = new_expense("Lunch", 500);
        expense.author_id = Some(author.id());
        let expense = store.create(expense).unwrap();
        assert_eq!(expense.author_id(), Some(author.id()));

        // No account-deletion flow exists in the core, so exercise the
        // schema-level invariant directly.
        connection
            .lock()
            .unwrap()
            .execute("DELETE FROM user WHERE id = ?1", (author.id().as_i64(),))
            .unwrap();

        let orphaned = store.get(expense.id()).unwrap();
        assert_eq!(orphaned.author_id(), None);
    }
}
