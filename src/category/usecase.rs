//! The application operations on categories.
//!
//! Each use case wraps a [CategoryRepository] and performs one operation:
//! existence checks happen here, before any mutation reaches the repository.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    Error, Resource,
    category::{Category, CategoryChanges, CategoryRepository},
    patch::double_option,
};

/// The fields a client supplies to create a category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateCategoryInput {
    /// The name of the new category.
    pub name: String,
    /// An optional description.
    pub description: Option<String>,
}

/// The fields a client may supply to update a category.
///
/// Omitted fields keep their current value, an explicit `null` description
/// removes it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateCategoryInput {
    /// The new name.
    pub name: Option<String>,
    /// The new description, `Some(None)` to remove it.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Creates a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryUseCase<R> {
    repository: R,
}

impl<R: CategoryRepository> CreateCategoryUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Build a new category from `input` and store it.
    pub async fn execute(&self, input: CreateCategoryInput) -> Result<Category, Error> {
        let category = Category::build(&input.name)
            .description(input.description)
            .finalise();

        let category = self.repository.create(category).await?;
        tracing::info!("created category {}", category.id);

        Ok(category)
    }
}

/// Lists every category.
#[derive(Debug, Clone)]
pub struct GetCategoriesUseCase<R> {
    repository: R,
}

impl<R: CategoryRepository> GetCategoriesUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Get all categories ordered by name.
    pub async fn execute(&self) -> Result<Vec<Category>, Error> {
        self.repository.find_all().await
    }
}

/// Fetches a single category.
#[derive(Debug, Clone)]
pub struct FindCategoryUseCase<R> {
    repository: R,
}

impl<R: CategoryRepository> FindCategoryUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Get the category with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no category with `id`.
    pub async fn execute(&self, id: &str) -> Result<Category, Error> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

/// Applies a partial update to a category.
#[derive(Debug, Clone)]
pub struct UpdateCategoryUseCase<R> {
    repository: R,
}

impl<R: CategoryRepository> UpdateCategoryUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Change the fields given in `input` on the category with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no category with `id`, in which
    /// case the repository is not asked to update anything.
    pub async fn execute(&self, id: &str, input: UpdateCategoryInput) -> Result<Category, Error> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        let changes = CategoryChanges {
            name: input.name,
            description: input.description,
            updated_at: OffsetDateTime::now_utc(),
        };

        let category = self.repository.update(id, changes).await?;
        tracing::info!("updated category {id}");

        Ok(category)
    }
}

/// Deletes a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryUseCase<R> {
    repository: R,
}

impl<R: CategoryRepository> DeleteCategoryUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Delete the category with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no category with `id`, in which
    /// case the repository is not asked to delete anything.
    pub async fn execute(&self, id: &str) -> Result<(), Error> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        self.repository.delete(id).await?;
        tracing::info!("deleted category {id}");

        Ok(())
    }
}

fn not_found(id: &str) -> Error {
    Error::NotFound {
        resource: Resource::Category,
        id: id.to_owned(),
    }
}
