//! Database connection wrapper and query-shape operations.
//!
//! # Responsibility
//! - Own one driver connection and fold the prepare/bind/execute/fetch/
//!   release cycle into one call per query shape.
//! - Convert driver failures into the crate error taxonomy.
//!
//! # Invariants
//! - Prepared statements never escape this module and are finalized on
//!   every exit path, success or failure.
//! - Execution failures always carry the driver's native error text.

use crate::error::{DbError, DbResult};
use crate::params::Params;
use crate::row::Row;
use log::{debug, error, info};
use rusqlite::types::Value;
use rusqlite::{Connection, Statement};
use std::time::Instant;

/// A named database connection exposing the query-shape operations.
///
/// Composes over the driver connection instead of exposing its surface:
/// callers only see the five operations below plus the open constructors.
/// The driver session is single-flight, and `rusqlite::Connection` is
/// `!Sync`, so sharing one `DbConnection` across threads requires
/// external serialization.
#[derive(Debug)]
pub struct DbConnection {
    name: String,
    conn: Connection,
}

impl DbConnection {
    /// Opens a connection to `dsn` (a SQLite database path, or
    /// `:memory:`). The DSN is an opaque pass-through to the driver.
    pub fn open(name: impl Into<String>, dsn: &str) -> DbResult<Self> {
        let name = name.into();
        let started_at = Instant::now();

        match Connection::open(dsn) {
            Ok(conn) => {
                info!(
                    "event=conn_open module=connection status=ok name={} duration_ms={}",
                    name,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { name, conn })
            }
            Err(err) => {
                error!(
                    "event=conn_open module=connection status=error name={} error={}",
                    name, err
                );
                Err(DbError::Connection { name, source: err })
            }
        }
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory(name: impl Into<String>) -> DbResult<Self> {
        let name = name.into();

        match Connection::open_in_memory() {
            Ok(conn) => {
                info!(
                    "event=conn_open module=connection status=ok name={} mode=memory",
                    name
                );
                Ok(Self { name, conn })
            }
            Err(err) => {
                error!(
                    "event=conn_open module=connection status=error name={} mode=memory error={}",
                    name, err
                );
                Err(DbError::Connection { name, source: err })
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs a query expected to yield at least one row and returns the
    /// first column of the first row. Remaining rows are not fetched.
    ///
    /// # Errors
    /// - `NoDataFound` when the query yields zero rows.
    pub fn scalar_query(&self, sql: &str, params: &Params) -> DbResult<Value> {
        let started_at = Instant::now();
        let result = self.scalar_inner(sql, params);
        self.observe("scalar", started_at, result)
    }

    /// Runs a query and returns every row in driver-delivered order.
    /// Zero rows yield an empty vector, not an error.
    pub fn select_query(&self, sql: &str, params: &Params) -> DbResult<Vec<Row>> {
        let started_at = Instant::now();
        let result = self.select_inner(sql, params);
        self.observe("select", started_at, result)
    }

    /// Runs a query and returns its first row, ignoring any others.
    ///
    /// With `fill_nulls` set, an empty result yields a row with every
    /// result column explicitly `Null` instead of `None`.
    pub fn single_row_query(
        &self,
        sql: &str,
        params: &Params,
        fill_nulls: bool,
    ) -> DbResult<Option<Row>> {
        let started_at = Instant::now();
        let result = self.single_row_inner(sql, params, fill_nulls);
        self.observe("single_row", started_at, result)
    }

    /// Runs a query whose caller asserts cardinality of at most one row.
    ///
    /// With `fill_nulls` set, an empty result yields a null-filled row as
    /// in [`single_row_query`](Self::single_row_query).
    ///
    /// # Errors
    /// - `NoSingleRow` when a second row exists.
    pub fn unique_row_query(
        &self,
        sql: &str,
        params: &Params,
        fill_nulls: bool,
    ) -> DbResult<Option<Row>> {
        let started_at = Instant::now();
        let result = self.unique_row_inner(sql, params, fill_nulls);
        self.observe("unique_row", started_at, result)
    }

    /// Executes a mutation and returns the affected-row count.
    pub fn execute_statement(&self, sql: &str, params: &Params) -> DbResult<usize> {
        let started_at = Instant::now();
        let result = self.execute_inner(sql, params);
        self.observe("execute", started_at, result)
    }

    fn scalar_inner(&self, sql: &str, params: &Params) -> DbResult<Value> {
        let mut stmt = self.prepare_bound(sql, params)?;
        let mut rows = stmt.raw_query();

        match rows.next().map_err(execution_error)? {
            Some(row) => row.get::<_, Value>(0).map_err(execution_error),
            None => Err(DbError::NoDataFound),
        }
    }

    fn select_inner(&self, sql: &str, params: &Params) -> DbResult<Vec<Row>> {
        let mut stmt = self.prepare_bound(sql, params)?;
        let columns = column_names(&stmt);
        let mut rows = stmt.raw_query();
        let mut collected = Vec::new();

        while let Some(row) = rows.next().map_err(execution_error)? {
            collected.push(Row::read(&columns, row).map_err(execution_error)?);
        }

        Ok(collected)
    }

    fn single_row_inner(
        &self,
        sql: &str,
        params: &Params,
        fill_nulls: bool,
    ) -> DbResult<Option<Row>> {
        let mut stmt = self.prepare_bound(sql, params)?;
        let columns = column_names(&stmt);
        let mut rows = stmt.raw_query();

        match rows.next().map_err(execution_error)? {
            Some(row) => Ok(Some(Row::read(&columns, row).map_err(execution_error)?)),
            None if fill_nulls => Ok(Some(Row::null_filled(&columns))),
            None => Ok(None),
        }
    }

    fn unique_row_inner(
        &self,
        sql: &str,
        params: &Params,
        fill_nulls: bool,
    ) -> DbResult<Option<Row>> {
        let mut stmt = self.prepare_bound(sql, params)?;
        let columns = column_names(&stmt);
        let mut rows = stmt.raw_query();

        let first = match rows.next().map_err(execution_error)? {
            Some(row) => Row::read(&columns, row).map_err(execution_error)?,
            None if fill_nulls => return Ok(Some(Row::null_filled(&columns))),
            None => return Ok(None),
        };

        // SQLite reports no row count for row-returning statements, so a
        // second fetch is the only reliable cardinality probe.
        if rows.next().map_err(execution_error)?.is_some() {
            return Err(DbError::NoSingleRow);
        }

        Ok(Some(first))
    }

    fn execute_inner(&self, sql: &str, params: &Params) -> DbResult<usize> {
        let mut stmt = self.prepare_bound(sql, params)?;
        stmt.raw_execute().map_err(execution_error)
    }

    /// Prepares `sql` and binds `params`, picking the error variant for
    /// the phase that failed. The statement is finalized by drop on every
    /// path out of the calling operation.
    fn prepare_bound<'conn>(&'conn self, sql: &str, params: &Params) -> DbResult<Statement<'conn>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|err| DbError::StatementPrepare {
                message: err.to_string(),
            })?;

        match params {
            Params::None => {}
            Params::Positional(values) => {
                for (index, value) in values.iter().enumerate() {
                    let position = index + 1;
                    stmt.raw_bind_parameter(position, value).map_err(|err| {
                        DbError::ParameterBind {
                            identifier: position.to_string(),
                            message: err.to_string(),
                        }
                    })?;
                }
            }
            Params::Named(entries) => {
                for (name, value) in entries {
                    let identifier = qualify_identifier(name);
                    let index = stmt
                        .parameter_index(&identifier)
                        .map_err(|err| DbError::ParameterBind {
                            identifier: identifier.clone(),
                            message: err.to_string(),
                        })?
                        .ok_or_else(|| DbError::ParameterBind {
                            identifier: identifier.clone(),
                            message: "no such parameter in statement".to_string(),
                        })?;
                    stmt.raw_bind_parameter(index, value).map_err(|err| {
                        DbError::ParameterBind {
                            identifier: identifier.clone(),
                            message: err.to_string(),
                        }
                    })?;
                }
            }
        }

        Ok(stmt)
    }

    /// Uniform result logging for the five operations.
    fn observe<T>(&self, shape: &str, started_at: Instant, result: DbResult<T>) -> DbResult<T> {
        match &result {
            Ok(_) => debug!(
                "event=query module=connection status=ok shape={} name={} duration_ms={}",
                shape,
                self.name,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=query module=connection status=error shape={} name={} duration_ms={} error={}",
                shape,
                self.name,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn column_names(stmt: &Statement<'_>) -> Vec<String> {
    stmt.column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Named bind identifiers default to the `:` prefix when the caller
/// supplied a bare name.
fn qualify_identifier(name: &str) -> String {
    if name.starts_with([':', '@', '$']) {
        name.to_string()
    } else {
        format!(":{name}")
    }
}

/// Converts a driver execution failure into `QueryExecution`, keeping the
/// driver's message and extended result code. Every operation funnels
/// execution failures through here so the message format stays uniform.
fn execution_error(err: rusqlite::Error) -> DbError {
    let message = match &err {
        rusqlite::Error::SqliteFailure(code, Some(text)) => {
            format!("{text} (code {})", code.extended_code)
        }
        other => other.to_string(),
    };
    DbError::QueryExecution { message }
}
