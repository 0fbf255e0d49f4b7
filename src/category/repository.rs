//! Defines the category repository trait.

use async_trait::async_trait;

use crate::{
    Error,
    category::{Category, CategoryChanges},
};

/// Stores and retrieves [Category] instances.
///
/// Implementations own the translation between categories and whatever the
/// backing store persists.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a fully formed category and return it as stored.
    async fn create(&self, category: Category) -> Result<Category, Error>;

    /// Get all categories ordered by name, ignoring ASCII case.
    async fn find_all(&self) -> Result<Vec<Category>, Error>;

    /// Get a category by its ID, or `None` if there is no such category.
    async fn find_by_id(&self, id: &str) -> Result<Option<Category>, Error>;

    /// Apply `changes` to the category with `id` and return the result.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no category with `id`.
    async fn update(&self, id: &str, changes: CategoryChanges) -> Result<Category, Error>;

    /// Remove the category with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no category with `id`.
    async fn delete(&self, id: &str) -> Result<(), Error>;
}
