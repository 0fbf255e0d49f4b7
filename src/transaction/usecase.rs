//! The application operations on transactions.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    Error, Resource,
    category::CategoryId,
    patch::double_option,
    transaction::{Transaction, TransactionChanges, TransactionRepository, TransactionType},
};

/// The fields a client supplies to create a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionInput {
    /// What the transaction was for.
    pub title: String,
    /// How much money was spent or earned.
    pub amount: f64,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category_id: Option<CategoryId>,
}

/// The fields a client may supply to update a transaction.
///
/// Omitted fields keep their current value, an explicit `null` category
/// detaches the transaction from its category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionInput {
    /// The new title.
    pub title: Option<String>,
    /// The new amount.
    pub amount: Option<f64>,
    /// The new transaction type.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// The new category, `Some(None)` to remove it.
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<CategoryId>>,
}

/// Creates a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionUseCase<R> {
    repository: R,
}

impl<R: TransactionRepository> CreateTransactionUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Build a new transaction from `input` and store it.
    pub async fn execute(&self, input: CreateTransactionInput) -> Result<Transaction, Error> {
        let transaction = Transaction::build(&input.title, input.amount, input.transaction_type)
            .category_id(input.category_id)
            .finalise();

        let transaction = self.repository.create(transaction).await?;
        tracing::info!(
            "created {} transaction {}",
            transaction.transaction_type,
            transaction.id
        );

        Ok(transaction)
    }
}

/// Lists every transaction.
#[derive(Debug, Clone)]
pub struct GetTransactionsUseCase<R> {
    repository: R,
}

impl<R: TransactionRepository> GetTransactionsUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Get all transactions, most recent first.
    pub async fn execute(&self) -> Result<Vec<Transaction>, Error> {
        self.repository.find_all().await
    }
}

/// Fetches a single transaction.
#[derive(Debug, Clone)]
pub struct FindTransactionUseCase<R> {
    repository: R,
}

impl<R: TransactionRepository> FindTransactionUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Get the transaction with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction with `id`.
    pub async fn execute(&self, id: &str) -> Result<Transaction, Error> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }
}

/// Applies a partial update to a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionUseCase<R> {
    repository: R,
}

impl<R: TransactionRepository> UpdateTransactionUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Change the fields given in `input` on the transaction with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction with `id`, in
    /// which case the repository is not asked to update anything.
    pub async fn execute(
        &self,
        id: &str,
        input: UpdateTransactionInput,
    ) -> Result<Transaction, Error> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        let changes = TransactionChanges {
            title: input.title,
            amount: input.amount,
            transaction_type: input.transaction_type,
            category_id: input.category_id,
            updated_at: OffsetDateTime::now_utc(),
        };

        let transaction = self.repository.update(id, changes).await?;
        tracing::info!("updated transaction {id}");

        Ok(transaction)
    }
}

/// Deletes a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionUseCase<R> {
    repository: R,
}

impl<R: TransactionRepository> DeleteTransactionUseCase<R> {
    /// Create the use case backed by `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Delete the transaction with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction with `id`, in
    /// which case the repository is not asked to delete anything.
    pub async fn execute(&self, id: &str) -> Result<(), Error> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        self.repository.delete(id).await?;
        tracing::info!("deleted transaction {id}");

        Ok(())
    }
}

fn not_found(id: &str) -> Error {
    Error::NotFound {
        resource: Resource::Transaction,
        id: id.to_owned(),
    }
}
