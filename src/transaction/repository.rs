//! Defines the transaction repository trait.

use async_trait::async_trait;

use crate::{
    Error,
    transaction::{Transaction, TransactionChanges},
};

/// Stores and retrieves [Transaction] instances.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persist a fully formed transaction and return it as stored.
    async fn create(&self, transaction: Transaction) -> Result<Transaction, Error>;

    /// Get all transactions, most recently created first.
    async fn find_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Get a transaction by its ID, or `None` if there is no such transaction.
    async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>, Error>;

    /// Apply `changes` to the transaction with `id` and return the result.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction with `id`.
    async fn update(&self, id: &str, changes: TransactionChanges) -> Result<Transaction, Error>;

    /// Remove the transaction with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction with `id`.
    async fn delete(&self, id: &str) -> Result<(), Error>;
}
