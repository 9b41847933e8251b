//! This file defines the `Category` type and the types needed to create one.
//! A category acts like a tag for expenses; an expense may have at most one
//! category.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, models::DatabaseID};

/// The title of a category.
///
/// Titles are unique across all categories, compared case-sensitively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryTitle(String);

impl CategoryTitle {
    /// Create a category title.
    ///
    /// # Errors
    ///
    /// This function will return [Error::InvalidTitle] if `title` is an
    /// empty string.
    pub fn new(title: &str) -> Result<Self, Error> {
        if title.is_empty() {
            Err(Error::InvalidTitle)
        } else {
            Ok(Self(title.to_string()))
        }
    }

    /// Create a category title without validation.
    ///
    /// The caller should ensure that the string is not empty. This function
    /// has `_unchecked` in the name but is not `unsafe`: violating the
    /// non-empty invariant causes incorrect behaviour but does not affect
    /// memory safety.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_string())
    }
}

impl AsRef<str> for CategoryTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named label for expenses, e.g., '👀 groceries'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    id: DatabaseID,
    title: CategoryTitle,
}

impl Category {
    /// Create a new category.
    pub fn new(id: DatabaseID, title: CategoryTitle) -> Self {
        Self { id, title }
    }

    /// The id of the category.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The title of the category.
    pub fn title(&self) -> &CategoryTitle {
        &self.title
    }
}

#[cfg(test)]
mod category_title_tests {
    use crate::Error;

    use super::CategoryTitle;

    #[test]
    fn new_fails_on_empty_string() {
        let title = CategoryTitle::new("");

        assert_eq!(title, Err(Error::InvalidTitle));
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let title = CategoryTitle::new("🔥");

        assert!(title.is_ok())
    }
}
