#![allow(missing_docs)]

mod server;
mod spies;

pub(crate) use server::{get_test_connection, get_test_server};
pub(crate) use spies::{SpyCategoryRepository, SpyTransactionRepository};
