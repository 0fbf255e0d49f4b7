//! Defines the core data models for transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::category::CategoryId;

/// Identifier for a transaction, a UUID string unless the caller supplied one.
pub type TransactionId = String;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "INCOME"),
            TransactionType::Expense => write!(f, "EXPENSE"),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction. Never changes once created.
    pub id: TransactionId,
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The ID of the category the transaction belongs to.
    pub category_id: Option<CategoryId>,
    /// When the transaction was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last updated, absent if it never has been.
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(title: &str, amount: f64, transaction_type: TransactionType) -> TransactionBuilder {
        TransactionBuilder {
            id: None,
            title: title.to_owned(),
            amount,
            transaction_type,
            category_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Return a copy of this transaction with `changes` overlaid.
    ///
    /// Only the fields set in `changes` are replaced, everything else keeps
    /// its current value. `updated_at` is always replaced.
    pub fn apply(self, changes: &TransactionChanges) -> Self {
        Self {
            id: self.id,
            title: changes.title.clone().unwrap_or(self.title),
            amount: changes.amount.unwrap_or(self.amount),
            transaction_type: changes.transaction_type.unwrap_or(self.transaction_type),
            category_id: changes.category_id.clone().unwrap_or(self.category_id),
            created_at: self.created_at,
            updated_at: Some(changes.updated_at),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The ID and creation time are generated by [TransactionBuilder::finalise]
/// unless they are set explicitly.
///
/// # Examples
///
/// ```ignore
/// use crate::transaction::{Transaction, TransactionType};
///
/// let transaction = Transaction::build("Salário", 5000.0, TransactionType::Income)
///     .category_id(Some("cat-1".to_owned()))
///     .finalise();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    id: Option<TransactionId>,
    title: String,
    amount: f64,
    transaction_type: TransactionType,
    category_id: Option<CategoryId>,
    created_at: Option<OffsetDateTime>,
    updated_at: Option<OffsetDateTime>,
}

impl TransactionBuilder {
    /// Use `id` instead of generating one.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    /// Set the category the transaction belongs to.
    pub fn category_id(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
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

    /// Create the [Transaction], generating the ID and creation time if needed.
    pub fn finalise(self) -> Transaction {
        Transaction {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category_id: self.category_id,
            created_at: self.created_at.unwrap_or_else(OffsetDateTime::now_utc),
            updated_at: self.updated_at,
        }
    }
}

/// The fields to change on an existing transaction.
///
/// A field set to `None` is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionChanges {
    /// The new title.
    pub title: Option<String>,
    /// The new amount.
    pub amount: Option<f64>,
    /// The new transaction type.
    pub transaction_type: Option<TransactionType>,
    /// The new category. `Some(None)` detaches the transaction from its category.
    pub category_id: Option<Option<CategoryId>>,
    /// The time of the update.
    pub updated_at: OffsetDateTime,
}
