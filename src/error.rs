//! Crate-wide error taxonomy for registry and query operations.
//!
//! # Responsibility
//! - Give callers one failure class per thing they may need to branch on.
//! - Preserve the driver's native error text for diagnostics.
//!
//! # Invariants
//! - No variant is raised while the owning statement is still open; cursor
//!   release happens before or during propagation.
//! - Cardinality outcomes (`NoDataFound`, `NoSingleRow`) stay distinct
//!   from transport failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DbResult<T> = Result<T, DbError>;

/// Every failure the registry and the query-shape operations can raise.
///
/// There is deliberately no blanket `From<rusqlite::Error>`: each call
/// site picks the variant matching the phase that failed (open, prepare,
/// bind, execute), so callers can tell them apart.
#[derive(Debug)]
pub enum DbError {
    /// Registration under a name that is already taken.
    DuplicateConnection(String),
    /// Lookup of a name that was never registered.
    UnknownConnection(String),
    /// The driver could not establish a session.
    Connection {
        name: String,
        source: rusqlite::Error,
    },
    /// The SQL text was rejected at prepare time.
    StatementPrepare { message: String },
    /// A parameter value could not be bound; `identifier` is the bind
    /// name or 1-based position that failed.
    ParameterBind {
        identifier: String,
        message: String,
    },
    /// Execution reported failure; carries the driver's error text.
    QueryExecution { message: String },
    /// A scalar query produced zero rows.
    NoDataFound,
    /// A unique-row query produced more than one row.
    NoSingleRow,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateConnection(name) => {
                write!(f, "connection name already registered: {name}")
            }
            Self::UnknownConnection(name) => write!(f, "connection not found: {name}"),
            Self::Connection { name, source } => {
                write!(f, "failed to open connection `{name}`: {source}")
            }
            Self::StatementPrepare { message } => {
                write!(f, "failed to prepare statement: {message}")
            }
            Self::ParameterBind {
                identifier,
                message,
            } => write!(f, "failed to bind parameter `{identifier}`: {message}"),
            Self::QueryExecution { message } => write!(f, "query execution failed: {message}"),
            Self::NoDataFound => write!(f, "query returned no rows where one was required"),
            Self::NoSingleRow => {
                write!(f, "query returned more than one row where at most one was expected")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;

    #[test]
    fn display_names_the_offending_identifier() {
        let err = DbError::ParameterBind {
            identifier: ":user_id".to_string(),
            message: "no such parameter".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains(":user_id"));
        assert!(text.contains("no such parameter"));
    }

    #[test]
    fn display_carries_driver_text_for_execution_failures() {
        let err = DbError::QueryExecution {
            message: "UNIQUE constraint failed: items.id".to_string(),
        };
        assert!(err.to_string().contains("UNIQUE constraint failed"));
    }

    #[test]
    fn duplicate_and_unknown_mention_the_name() {
        assert!(DbError::DuplicateConnection("main".to_string())
            .to_string()
            .contains("main"));
        assert!(DbError::UnknownConnection("default".to_string())
            .to_string()
            .contains("default"));
    }
}
