//! Defines the user store trait.

use crate::{
    Error,
    models::{User, UserID},
};

/// Handles the creation and retrieval of users.
pub trait UserStore {
    /// Create a new user.
    ///
    /// Returns [Error::DuplicateExternalId] if a user with the same external
    /// auth ID already exists.
    fn create(&mut self, external_auth_id: &str, display_name: &str) -> Result<User, Error>;

    /// Get a user by their ID.
    ///
    /// Returns [Error::NotFound] if no user with the given ID exists.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by the subject identifier issued by the external identity
    /// provider.
    ///
    /// Returns [Error::NotFound] if no user with the given external auth ID
    /// exists.
    fn get_by_external_id(&self, external_auth_id: &str) -> Result<User, Error>;
}
