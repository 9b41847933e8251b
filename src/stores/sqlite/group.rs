//! Implements a SQLite backed group store, including the membership
//! operations.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Expense, Group, GroupID, User, UserID},
    stores::GroupStore,
    stores::sqlite::{SQLiteExpenseStore, SQLiteUserStore},
};

/// Creates and retrieves groups and their membership to/from a SQLite
/// database.
#[derive(Debug, Clone)]
pub struct SQLiteGroupStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteGroupStore {
    /// Create a new group store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl GroupStore for SQLiteGroupStore {
    /// Create a group in the database with no members and no expenses.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn create(&mut self, name: &str) -> Result<Group, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute("INSERT INTO user_group (name) VALUES (?1)", (name,))?;

        let id = GroupID::new(connection.last_insert_rowid());

        Ok(Group::new(id, name.to_string()))
    }

    /// Get the group from the database that has the specified `id`, or
    /// return [Error::NotFound] if no such group exists.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    fn get(&self, id: GroupID) -> Result<Group, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name FROM user_group WHERE id = :id")?
            .query_row(&[(":id", &id.as_i64())], SQLiteGroupStore::map_row)
            .map_err(|error| error.into())
    }

    /// Change the name of the group with `id`.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no group with `id` exists.
    fn rename(&mut self, id: GroupID, name: &str) -> Result<(), Error> {
        let rows_updated = self.connection.lock().unwrap().execute(
            "UPDATE user_group SET name = ?1 WHERE id = ?2",
            (name, id.as_i64()),
        )?;

        if rows_updated == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    /// Add the user with `user_id` to the group's member set.
    ///
    /// The existence check and the insert run under the same connection
    /// lock, and the membership table's composite primary key backstops the
    /// no-duplicate-member invariant.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// Returns [Error::UserNotFound] if `user_id` does not refer to an
    /// existing user, and [Error::AlreadyMember] if the user is already in
    /// the group.
    fn add_member(&mut self, group_id: GroupID, user_id: UserID) -> Result<(), Error> {
        let connection = self.connection.lock().unwrap();

        let user_exists: bool = connection.query_row(
            "SELECT EXISTS (SELECT 1 FROM user WHERE id = ?1)",
            (user_id.as_i64(),),
            |row| row.get(0),
        )?;

        if !user_exists {
            return Err(Error::UserNotFound);
        }

        connection.execute(
            "INSERT INTO membership (group_id, user_id) VALUES (?1, ?2)",
            (group_id.as_i64(), user_id.as_i64()),
        )?;

        Ok(())
    }

    /// Remove the user with `user_id` from the group's member set.
    ///
    /// A no-op when the user is not a member. Expenses authored by the
    /// removed member are left in the group untouched.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn remove_member(&mut self, group_id: GroupID, user_id: UserID) -> Result<(), Error> {
        self.connection.lock().unwrap().execute(
            "DELETE FROM membership WHERE group_id = ?1 AND user_id = ?2",
            (group_id.as_i64(), user_id.as_i64()),
        )?;

        Ok(())
    }

    /// Get the members of the group with `group_id`, ordered by user ID.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_members(&self, group_id: GroupID) -> Result<Vec<User>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT u.id, u.external_auth_id, u.display_name
                FROM membership m INNER JOIN user u ON m.user_id = u.id
                WHERE m.group_id = :group_id
                ORDER BY u.id",
            )?
            .query_map(&[(":group_id", &group_id.as_i64())], SQLiteUserStore::map_row)?
            .map(|maybe_user| maybe_user.map_err(|error| error.into()))
            .collect()
    }

    /// Get the expenses belonging to the group with `group_id`, newest
    /// first.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or
    /// is poisoned.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn get_expenses(&self, group_id: GroupID) -> Result<Vec<Expense>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, amount, author_id, group_id, category_id, is_completed, status, timestamp
                FROM expense WHERE group_id = :group_id
                ORDER BY timestamp DESC, id DESC",
            )?
            .query_map(
                &[(":group_id", &group_id.as_i64())],
                SQLiteExpenseStore::map_row,
            )?
            .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SQLiteGroupStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        // "group" is an SQL keyword, hence the user_group table name.
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user_group (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );",
            (),
        )?;

        connection.execute(
            "CREATE TABLE IF NOT EXISTS membership (
                group_id INTEGER NOT NULL REFERENCES user_group(id) ON DELETE CASCADE,
                user_id INTEGER NOT NULL REFERENCES user(id) ON DELETE CASCADE,
                PRIMARY KEY (group_id, user_id)
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteGroupStore {
    type ReturnType = Group;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let raw_id = row.get(offset)?;
        let name = row.get(offset + 1)?;

        Ok(Group::new(GroupID::new(raw_id), name))
    }
}
