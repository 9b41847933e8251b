//! Divvy is the storage and session core of a group expense tracking app.
//!
//! This library owns the data model (users, groups, expenses, categories),
//! the mutation rules over it, and the sign-in gateway that exchanges an
//! external identity assertion for a local user record. The host shell is
//! expected to provide the UI and hand fully resolved credentials to
//! [authenticate].

#![warn(missing_docs)]

mod app_state;
mod auth;
mod db;
mod logging;
mod session;

pub mod models;
pub mod stores;

pub use app_state::AppState;
pub use auth::{ExternalCredential, authenticate};
pub use db::initialize as initialize_db;
pub use logging::init_logging;
pub use session::{Session, clear_session, load_session, store_session};

/// The errors that may occur in the application core.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The external identity assertion did not carry a usable subject
    /// identifier, so no user record can be looked up or created.
    #[error("the credential is missing a subject identifier")]
    InvalidCredential,

    /// An empty string was used as a category title.
    #[error("a category title cannot be empty")]
    InvalidTitle,

    /// The category title already exists in the database. Titles are compared
    /// case-sensitively, so "Food" and "food" are distinct.
    #[error("a category with this title already exists")]
    DuplicateTitle,

    /// A user with the same external auth ID already exists in the database.
    ///
    /// [authenticate] treats this as a lost race with a concurrent sign-in
    /// and falls back to looking the user up again.
    #[error("a user with this external auth ID already exists")]
    DuplicateExternalId,

    /// A negative amount was used to create an expense. Amounts are integer
    /// minor units (cents) and must be zero or greater.
    #[error("expense amounts must not be negative")]
    InvalidAmount,

    /// A membership operation referenced a user ID that does not exist.
    #[error("the user ID does not refer to a valid user")]
    UserNotFound,

    /// The user is already a member of the group.
    #[error("the user is already a member of the group")]
    AlreadyMember,

    /// The requested record was not found.
    ///
    /// Internally, this error may occur when a query returns no rows or
    /// when a statement referenced a row that does not exist.
    #[error("the requested record could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("category.title") =>
            {
                Error::DuplicateTitle
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.external_auth_id") =>
            {
                Error::DuplicateExternalId
            }
            // The membership table's composite primary key (group_id,
            // user_id) is enforced through a unique index, so a duplicate
            // pair surfaces as code 2067 naming the membership columns.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("membership") =>
            {
                Error::AlreadyMember
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::NotFound
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
