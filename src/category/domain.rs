//! Core category domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Identifier for a category, a UUID string unless the caller supplied one.
pub type CategoryId = String;

/// A named grouping for transactions, e.g. 'Groceries', 'Eating Out', 'Wages'.
///
/// To create a new `Category`, use [Category::build].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The ID of the category. Never changes once created.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: String,
    /// An optional free-text description.
    pub description: Option<String>,
    /// When the category was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the category was last updated, absent if it never has been.
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Category {
    /// Start building a new category.
    ///
    /// Shortcut for [CategoryBuilder] for discoverability.
    pub fn build(name: &str) -> CategoryBuilder {
        CategoryBuilder {
            id: None,
            name: name.to_owned(),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Return a copy of this category with `changes` overlaid.
    ///
    /// Only the fields set in `changes` are replaced, everything else keeps
    /// its current value. `updated_at` is always replaced.
    pub fn apply(self, changes: &CategoryChanges) -> Self {
        Self {
            id: self.id,
            name: changes.name.clone().unwrap_or(self.name),
            description: changes.description.clone().unwrap_or(self.description),
            created_at: self.created_at,
            updated_at: Some(changes.updated_at),
        }
    }
}

/// A builder for creating new [Category] instances.
///
/// The ID and creation time are generated by [CategoryBuilder::finalise]
/// unless they are set explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBuilder {
    id: Option<CategoryId>,
    name: String,
    description: Option<String>,
    created_at: Option<OffsetDateTime>,
    updated_at: Option<OffsetDateTime>,
}

impl CategoryBuilder {
    /// Use `id` instead of generating one.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Set the description of the category.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Use `created_at` instead of the current time.
    pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set the last updated time.
    pub fn updated_at(mut self, updated_at: Option<OffsetDateTime>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Create the [Category], generating the ID and creation time if needed.
    pub fn finalise(self) -> Category {
        Category {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name,
            description: self.description,
            created_at: self.created_at.unwrap_or_else(OffsetDateTime::now_utc),
            updated_at: self.updated_at,
        }
    }
}

/// The fields to change on an existing category.
///
/// A field set to `None` is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChanges {
    /// The new name, if it should change.
    pub name: Option<String>,
    /// The new description, if it should change. `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// The time of the update.
    pub updated_at: OffsetDateTime,
}
