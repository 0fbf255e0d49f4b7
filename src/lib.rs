//! FinTrack is a web service for tracking personal income and expenses.
//!
//! This library provides a JSON REST API for two resources, transactions and
//! the categories they are grouped by, backed by a SQLite database.

#![warn(missing_docs)]

use std::{fmt::Display, net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod category;
mod db;
pub mod endpoints;
mod logging;
mod not_found;
mod patch;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, SQLAppState, create_app_state};
pub use category::{
    CategoriesController, Category, CategoryBuilder, CategoryChanges, CategoryId, CategoryRepository,
    CreateCategoryInput, SQLiteCategoryRepository, UpdateCategoryInput,
};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    CreateTransactionInput, SQLiteTransactionRepository, Transaction, TransactionBuilder,
    TransactionChanges, TransactionId, TransactionRepository, TransactionType,
    TransactionsController, UpdateTransactionInput,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The kinds of resource the API manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A [Category].
    Category,
    /// A [Transaction].
    Transaction,
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Category => write!(f, "category"),
            Resource::Transaction => write!(f, "transaction"),
        }
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the resource has been created.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The kind of resource that was requested.
        resource: Resource,
        /// The ID that did not match any row.
        id: String,
    },

    /// The request body could not be parsed, or parsed into values that are
    /// not allowed (e.g., an empty category name).
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A query was given a category ID that does not refer to a category.
    #[error("the category ID does not refer to a valid category")]
    InvalidForeignKey,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A failure in the server itself, e.g. the port is already in use or a
    /// response body could not be buffered.
    #[error("server error: {0}")]
    ServerError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::InvalidForeignKey
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidBody(_) | Error::InvalidForeignKey => StatusCode::BAD_REQUEST,
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);

                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "an internal server error occurred" })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use rusqlite::ffi;

    use crate::{Error, Resource};

    #[test]
    fn not_found_maps_to_404() {
        let error = Error::NotFound {
            resource: Resource::Category,
            id: "abc".to_owned(),
        };

        assert_eq!(error.to_string(), "category with id abc not found");
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_body_maps_to_400() {
        let response = Error::InvalidBody("name cannot be empty".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn foreign_key_failure_is_classified() {
        let sql_error = rusqlite::Error::SqliteFailure(
            ffi::Error {
                code: ffi::ErrorCode::ConstraintViolation,
                extended_code: 787,
            },
            Some("FOREIGN KEY constraint failed".to_owned()),
        );

        assert_eq!(Error::from(sql_error), Error::InvalidForeignKey);
    }

    #[test]
    fn other_sql_errors_map_to_500() {
        let error = Error::from(rusqlite::Error::InvalidQuery);

        assert_eq!(error, Error::SqlError(rusqlite::Error::InvalidQuery));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
