//! Sets up the application's database.

use rusqlite::Connection;

use crate::{category::create_category_table, transaction::create_transaction_table};

/// Create all of the database tables for the application.
///
/// Foreign key enforcement is switched on for `connection`, so a transaction
/// can only refer to a category that exists.
///
/// # Errors
/// This function may return a [rusqlite::Error] if something went wrong creating the tables.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = connection.unchecked_transaction()?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()
}
