//! Helpers for tests that need a real database or a running router.

use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{build_router, create_app_state, initialize_db};

/// An initialized in-memory database, shared the way the SQLite repositories expect.
pub(crate) fn get_test_connection() -> Arc<Mutex<Connection>> {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database.");
    initialize_db(&connection).expect("Could not initialize database.");

    Arc::new(Mutex::new(connection))
}

/// A test server for the full router backed by an in-memory database.
pub(crate) fn get_test_server() -> TestServer {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database.");
    let state = create_app_state(connection).expect("Could not create app state.");
    let app = build_router(state);

    TestServer::try_new(app).expect("Could not create test server.")
}
