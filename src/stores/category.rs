//! Defines the category store trait and the default category seed list.

use crate::{
    Error,
    models::{Category, CategoryTitle, DatabaseID},
};

/// The categories seeded into an empty registry on first launch, in order.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["👀 utilities", "👀 groceries", "👀 house"];

/// Creates and retrieves expense categories.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    ///
    /// Returns [Error::DuplicateTitle] if a category with the same title
    /// already exists. Titles are compared case-sensitively.
    fn create(&self, title: CategoryTitle) -> Result<Category, Error>;

    /// Get a category by its ID.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error>;

    /// Get all categories.
    fn get_all(&self) -> Result<Vec<Category>, Error>;

    /// Insert the [DEFAULT_CATEGORIES] if, and only if, the store holds no
    /// categories yet.
    ///
    /// Returns the categories that were inserted, which is empty on every
    /// call after the first.
    fn seed_defaults(&self) -> Result<Vec<Category>, Error>;
}
