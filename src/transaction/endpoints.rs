//! The HTTP handlers for the transaction API.

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::{
    AppState, Error,
    transaction::{
        CreateTransactionInput, CreateTransactionUseCase, DeleteTransactionUseCase,
        FindTransactionUseCase, GetTransactionsUseCase, Transaction, TransactionId,
        TransactionRepository, UpdateTransactionInput, UpdateTransactionUseCase,
    },
};

/// The use cases behind the transaction routes.
#[derive(Debug, Clone)]
pub struct TransactionsController<R> {
    create: CreateTransactionUseCase<R>,
    get: GetTransactionsUseCase<R>,
    find: FindTransactionUseCase<R>,
    update: UpdateTransactionUseCase<R>,
    delete: DeleteTransactionUseCase<R>,
}

impl<R: TransactionRepository + Clone> TransactionsController<R> {
    /// Build every transaction use case on top of `repository`.
    pub fn new(repository: R) -> Self {
        Self {
            create: CreateTransactionUseCase::new(repository.clone()),
            get: GetTransactionsUseCase::new(repository.clone()),
            find: FindTransactionUseCase::new(repository.clone()),
            update: UpdateTransactionUseCase::new(repository.clone()),
            delete: DeleteTransactionUseCase::new(repository),
        }
    }
}

impl<C, T: Clone> FromRef<AppState<C, T>> for TransactionsController<T> {
    fn from_ref(state: &AppState<C, T>) -> Self {
        state.transactions.clone()
    }
}

fn check_title(title: &str) -> Result<(), Error> {
    if title.trim().is_empty() {
        return Err(Error::InvalidBody("title cannot be empty".to_owned()));
    }

    Ok(())
}

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the created transaction, or 400 if the category
/// does not exist.
pub async fn create_transaction_endpoint<R>(
    State(controller): State<TransactionsController<R>>,
    WithRejection(Json(input), _): WithRejection<Json<CreateTransactionInput>, Error>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    R: TransactionRepository + Clone,
{
    check_title(&input.title)?;

    let transaction = controller.create.execute(input).await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// A route handler for listing all transactions, most recent first.
pub async fn get_transactions_endpoint<R>(
    State(controller): State<TransactionsController<R>>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    R: TransactionRepository + Clone,
{
    controller.get.execute().await.map(Json)
}

/// A route handler for getting a transaction by its ID.
pub async fn get_transaction_endpoint<R>(
    State(controller): State<TransactionsController<R>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error>
where
    R: TransactionRepository + Clone,
{
    controller.find.execute(&transaction_id).await.map(Json)
}

/// A route handler for partially updating a transaction.
pub async fn update_transaction_endpoint<R>(
    State(controller): State<TransactionsController<R>>,
    Path(transaction_id): Path<TransactionId>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateTransactionInput>, Error>,
) -> Result<Json<Transaction>, Error>
where
    R: TransactionRepository + Clone,
{
    if let Some(title) = &input.title {
        check_title(title)?;
    }

    controller
        .update
        .execute(&transaction_id, input)
        .await
        .map(Json)
}

/// A route handler for deleting a transaction.
///
/// Responds with 204 on success and 404 if there is no such transaction.
pub async fn delete_transaction_endpoint<R>(
    State(controller): State<TransactionsController<R>>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, Error>
where
    R: TransactionRepository + Clone,
{
    controller.delete.execute(&transaction_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
