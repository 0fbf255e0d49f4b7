//! Implements a SQLite backed category repository.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error, Resource,
    category::{Category, CategoryChanges, CategoryRepository},
};

/// Stores and retrieves categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryRepository {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryRepository {
    /// Create a new category repository with a SQLite database.
    ///
    /// The category table must already exist, see [crate::initialize_db].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

#[async_trait]
impl CategoryRepository for SQLiteCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, Error> {
        let connection = self.lock()?;

        insert_category(&category, &connection)?;

        get_category(&category.id, &connection)?.ok_or_else(|| not_found(&category.id))
    }

    async fn find_all(&self) -> Result<Vec<Category>, Error> {
        let connection = self.lock()?;

        get_all_categories(&connection)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Category>, Error> {
        let connection = self.lock()?;

        get_category(id, &connection)
    }

    async fn update(&self, id: &str, changes: CategoryChanges) -> Result<Category, Error> {
        let connection = self.lock()?;

        update_category(id, &changes, &connection)
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        let connection = self.lock()?;

        delete_category(id, &connection)
    }
}

fn insert_category(category: &Category, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO category (id, name, description, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            &category.id,
            &category.name,
            &category.description,
            category.created_at,
            category.updated_at,
        ),
    )?;

    Ok(())
}

fn get_category(id: &str, connection: &Connection) -> Result<Option<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, description, created_at, updated_at FROM category WHERE id = :id;",
        )?
        .query_row(&[(":id", id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, description, created_at, updated_at FROM category ORDER BY name COLLATE NOCASE ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Overlay `changes` on the stored category inside a single SQL transaction.
fn update_category(
    id: &str,
    changes: &CategoryChanges,
    connection: &Connection,
) -> Result<Category, Error> {
    let transaction = connection.unchecked_transaction()?;

    let updated = get_category(id, &transaction)?
        .ok_or_else(|| not_found(id))?
        .apply(changes);

    transaction.execute(
        "UPDATE category SET name = ?1, description = ?2, updated_at = ?3 WHERE id = ?4",
        (&updated.name, &updated.description, updated.updated_at, id),
    )?;

    let stored = get_category(id, &transaction)?.ok_or_else(|| not_found(id))?;
    transaction.commit()?;

    Ok(stored)
}

fn delete_category(id: &str, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(not_found(id));
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_category_name ON category(name COLLATE NOCASE);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn not_found(id: &str) -> Error {
    Error::NotFound {
        resource: Resource::Category,
        id: id.to_owned(),
    }
}

#[cfg(test)]
mod category_repository_tests {
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        Error, Resource,
        category::{Category, CategoryChanges, CategoryRepository, SQLiteCategoryRepository},
        test_utils::get_test_connection,
    };

    fn get_test_repository() -> SQLiteCategoryRepository {
        SQLiteCategoryRepository::new(get_test_connection())
    }

    #[tokio::test]
    async fn create_category_succeeds() {
        let repository = get_test_repository();
        let category = Category::build("Alimentação")
            .description(Some("Gastos com comida".to_owned()))
            .finalise();

        let created = repository
            .create(category.clone())
            .await
            .expect("Could not create category");

        assert_eq!(created, category);
    }

    #[tokio::test]
    async fn find_by_id_round_trips_all_fields() {
        let repository = get_test_repository();
        let category = Category::build("Moradia")
            .id("cat-1")
            .created_at(datetime!(2024-01-01 08:15:30.123456 UTC))
            .updated_at(Some(datetime!(2024-01-02 09:00 UTC)))
            .finalise();
        repository.create(category.clone()).await.unwrap();

        let got = repository.find_by_id("cat-1").await;

        assert_eq!(got, Ok(Some(category)));
    }

    #[tokio::test]
    async fn find_by_id_with_unknown_id_returns_none() {
        let repository = get_test_repository();
        repository
            .create(Category::build("Foo").finalise())
            .await
            .unwrap();

        let got = repository.find_by_id("not-a-category").await;

        assert_eq!(got, Ok(None));
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_empty() {
        let repository = get_test_repository();

        let got = repository.find_all().await;

        assert_eq!(got, Ok(vec![]));
    }

    #[tokio::test]
    async fn find_all_orders_by_name() {
        let repository = get_test_repository();
        let transport = Category::build("Transporte").finalise();
        let food = Category::build("Alimentação").finalise();
        let leisure = Category::build("Lazer").finalise();
        for category in [&transport, &food, &leisure] {
            repository.create(category.clone()).await.unwrap();
        }

        let got = repository.find_all().await;

        assert_eq!(got, Ok(vec![food, leisure, transport]));
    }

    #[tokio::test]
    async fn find_all_ignores_case_when_ordering() {
        let repository = get_test_repository();
        let transport = Category::build("Transporte").finalise();
        let bank = Category::build("banco").finalise();
        let food = Category::build("Alimentação").finalise();
        for category in [&transport, &bank, &food] {
            repository.create(category.clone()).await.unwrap();
        }

        let got = repository.find_all().await;

        assert_eq!(got, Ok(vec![food, bank, transport]));
    }

    #[tokio::test]
    async fn update_can_remove_description() {
        let repository = get_test_repository();
        let category = Category::build("Original")
            .description(Some("Remove me".to_owned()))
            .finalise();
        repository.create(category.clone()).await.unwrap();

        let updated = repository
            .update(
                &category.id,
                CategoryChanges {
                    name: None,
                    description: Some(None),
                    updated_at: OffsetDateTime::now_utc(),
                },
            )
            .await
            .expect("Could not update category");

        assert_eq!(updated.description, None);
        assert_eq!(repository.find_by_id(&category.id).await, Ok(Some(updated)));
    }

    #[tokio::test]
    async fn update_only_changes_given_fields() {
        let repository = get_test_repository();
        let category = Category::build("Original")
            .description(Some("Keep me".to_owned()))
            .finalise();
        repository.create(category.clone()).await.unwrap();
        let updated_at = OffsetDateTime::now_utc();

        let updated = repository
            .update(
                &category.id,
                CategoryChanges {
                    name: Some("Updated".to_owned()),
                    description: None,
                    updated_at,
                },
            )
            .await
            .expect("Could not update category");

        assert_eq!(updated.name, "Updated");
        assert_eq!(updated.description.as_deref(), Some("Keep me"));
        assert_eq!(updated.created_at, category.created_at);
        assert_eq!(updated.updated_at, Some(updated_at));
        assert_eq!(repository.find_by_id(&category.id).await, Ok(Some(updated)));
    }

    #[tokio::test]
    async fn update_with_unknown_id_returns_not_found() {
        let repository = get_test_repository();

        let result = repository
            .update(
                "missing",
                CategoryChanges {
                    name: Some("Updated".to_owned()),
                    description: None,
                    updated_at: OffsetDateTime::now_utc(),
                },
            )
            .await;

        assert_eq!(
            result,
            Err(Error::NotFound {
                resource: Resource::Category,
                id: "missing".to_owned()
            })
        );
    }

    #[tokio::test]
    async fn delete_category_succeeds() {
        let repository = get_test_repository();
        let category = Category::build("ToDelete").finalise();
        repository.create(category.clone()).await.unwrap();

        let result = repository.delete(&category.id).await;

        assert_eq!(result, Ok(()));
        assert_eq!(repository.find_by_id(&category.id).await, Ok(None));
    }

    #[tokio::test]
    async fn delete_with_unknown_id_returns_not_found() {
        let repository = get_test_repository();

        let result = repository.delete("missing").await;

        assert!(matches!(result, Err(Error::NotFound { .. })));
    }
}
