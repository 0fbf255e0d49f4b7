//! Transactions: money that was either earned or spent.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionRepository` trait and its SQLite implementation
//! - The use cases and route handlers for the transaction API

mod db;
mod domain;
mod endpoints;
mod repository;
mod usecase;

pub use db::{SQLiteTransactionRepository, create_transaction_table};
pub use domain::{
    Transaction, TransactionBuilder, TransactionChanges, TransactionId, TransactionType,
};
pub use endpoints::{
    TransactionsController, create_transaction_endpoint, delete_transaction_endpoint,
    get_transaction_endpoint, get_transactions_endpoint, update_transaction_endpoint,
};
pub use repository::TransactionRepository;
pub use usecase::{
    CreateTransactionInput, CreateTransactionUseCase, DeleteTransactionUseCase,
    FindTransactionUseCase, GetTransactionsUseCase, UpdateTransactionInput,
    UpdateTransactionUseCase,
};
