//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    category::{CategoriesController, CategoryRepository, SQLiteCategoryRepository},
    db::initialize,
    transaction::{SQLiteTransactionRepository, TransactionRepository, TransactionsController},
};

/// The state of the REST server.
///
/// `C` and `T` are the repositories backing the category and transaction
/// routes respectively.
#[derive(Debug, Clone)]
pub struct AppState<C, T> {
    /// The use cases for the category routes.
    pub categories: CategoriesController<C>,

    /// The use cases for the transaction routes.
    pub transactions: TransactionsController<T>,
}

impl<C, T> AppState<C, T>
where
    C: CategoryRepository + Clone,
    T: TransactionRepository + Clone,
{
    /// Create a new [AppState], wiring each repository into its use cases.
    pub fn new(category_repository: C, transaction_repository: T) -> Self {
        Self {
            categories: CategoriesController::new(category_repository),
            transactions: TransactionsController::new(transaction_repository),
        }
    }
}

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteCategoryRepository, SQLiteTransactionRepository>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn create_app_state(db_connection: Connection) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        SQLiteCategoryRepository::new(connection.clone()),
        SQLiteTransactionRepository::new(connection),
    ))
}
