//! Convenience layer over a synchronous SQLite driver.
//!
//! `dbkit` folds the prepare/bind/execute/fetch/release boilerplate of
//! the common query shapes into one call each, and keeps named
//! connections in an explicit registry:
//!
//! - [`DbConnection::scalar_query`]: first column of the first row
//! - [`DbConnection::select_query`]: every row, in driver order
//! - [`DbConnection::single_row_query`]: the first row, if any
//! - [`DbConnection::unique_row_query`]: the only row; a second row is an
//!   error
//! - [`DbConnection::execute_statement`]: mutation, returns the
//!   affected-row count
//!
//! Cardinality violations surface as typed [`DbError`] variants instead
//! of silent truncation, and every driver cursor is released before a
//! call returns, on success and failure paths alike.

pub mod connection;
pub mod error;
pub mod logging;
pub mod params;
pub mod registry;
pub mod row;

pub use connection::DbConnection;
pub use error::{DbError, DbResult};
pub use logging::{init_logging, logging_status};
pub use params::{BindType, ParamValue, Params};
pub use registry::{ConnectionRegistry, DEFAULT_CONNECTION};
pub use row::Row;

// Column values surface as the driver's value type; re-exported so
// callers need no direct rusqlite dependency.
pub use rusqlite::types::Value;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
