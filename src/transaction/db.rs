//! Implements a SQLite backed transaction repository.
//!
//! Transaction types are stored as lower case codes ("income", "expense"),
//! the conversion to and from [TransactionType] only happens in this module.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{
    Connection, OptionalExtension, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};

use crate::{
    Error, Resource,
    transaction::{Transaction, TransactionChanges, TransactionRepository, TransactionType},
};

const INCOME_CODE: &str = "income";
const EXPENSE_CODE: &str = "expense";

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let code = match self {
            TransactionType::Income => INCOME_CODE,
            TransactionType::Expense => EXPENSE_CODE,
        };

        Ok(ToSqlOutput::from(code))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            INCOME_CODE => Ok(TransactionType::Income),
            EXPENSE_CODE => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type code \"{other}\"").into(),
            )),
        }
    }
}

/// Stores and retrieves transactions to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionRepository {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionRepository {
    /// Create a new transaction repository with a SQLite database.
    ///
    /// The transaction table must already exist, see [crate::initialize_db].
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
impl TransactionRepository for SQLiteTransactionRepository {
    async fn create(&self, transaction: Transaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        insert_transaction(&transaction, &connection)?;

        get_transaction(&transaction.id, &connection)?.ok_or_else(|| not_found(&transaction.id))
    }

    async fn find_all(&self) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        get_all_transactions(&connection)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>, Error> {
        let connection = self.lock()?;

        get_transaction(id, &connection)
    }

    async fn update(&self, id: &str, changes: TransactionChanges) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        update_transaction(id, &changes, &connection)
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        let connection = self.lock()?;

        delete_transaction(id, &connection)
    }
}

fn insert_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (id, title, amount, type, category_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        (
            &transaction.id,
            &transaction.title,
            transaction.amount,
            transaction.transaction_type,
            &transaction.category_id,
            transaction.created_at,
            transaction.updated_at,
        ),
    )?;

    Ok(())
}

fn get_transaction(id: &str, connection: &Connection) -> Result<Option<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, title, amount, type, category_id, created_at, updated_at
            FROM \"transaction\" WHERE id = :id;",
        )?
        .query_row(&[(":id", id)], map_row)
        .optional()
        .map_err(|error| error.into())
}

fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, title, amount, type, category_id, created_at, updated_at
            FROM \"transaction\" ORDER BY created_at DESC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Overlay `changes` on the stored transaction inside a single SQL transaction.
fn update_transaction(
    id: &str,
    changes: &TransactionChanges,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    let updated = get_transaction(id, &sql_transaction)?
        .ok_or_else(|| not_found(id))?
        .apply(changes);

    sql_transaction.execute(
        "UPDATE \"transaction\"
        SET title = ?1, amount = ?2, type = ?3, category_id = ?4, updated_at = ?5
        WHERE id = ?6",
        (
            &updated.title,
            updated.amount,
            updated.transaction_type,
            &updated.category_id,
            updated.updated_at,
            id,
        ),
    )?;

    let stored = get_transaction(id, &sql_transaction)?.ok_or_else(|| not_found(id))?;
    sql_transaction.commit()?;

    Ok(stored)
}

fn delete_transaction(id: &str, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(not_found(id));
    }

    Ok(())
}

/// Initialize the transaction table and indexes.
///
/// The category table must be created first.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            amount REAL NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            category_id TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT,
            FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_created_at ON \"transaction\"(created_at);",
    )?;

    Ok(())
}

/// Rebuild a transaction from a row, trusting the stored values.
fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        transaction_type: row.get(3)?,
        category_id: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn not_found(id: &str) -> Error {
    Error::NotFound {
        resource: Resource::Transaction,
        id: id.to_owned(),
    }
}
