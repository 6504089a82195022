//! Named connection registry.
//!
//! # Responsibility
//! - Hold process-lifetime connections keyed by name.
//! - Hand out shared handles without duplicating driver sessions.
//!
//! # Invariants
//! - A name maps to the same connection instance for the registry's whole
//!   lifetime; there is no removal or replacement.
//! - A failed registration leaves no partial entry behind.

use crate::connection::DbConnection;
use crate::error::{DbError, DbResult};
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name used by [`ConnectionRegistry::get_default`].
pub const DEFAULT_CONNECTION: &str = "default";

/// Registry of named database connections.
///
/// Intended lifecycle: populate once at startup, read for the rest of the
/// process. `register` takes `&mut self`, so registration is serialized
/// against lookups by the borrow checker; after setup the registry can be
/// read freely. The registry is an explicit value handed to callers, not
/// a process-wide singleton.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: BTreeMap<String, Arc<DbConnection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a connection to `dsn` and stores it under `name`.
    ///
    /// # Errors
    /// - `DuplicateConnection` when `name` is already registered.
    /// - `Connection` when the driver cannot establish the session; the
    ///   failure propagates and nothing is stored.
    pub fn register(&mut self, name: &str, dsn: &str) -> DbResult<()> {
        if self.connections.contains_key(name) {
            return Err(DbError::DuplicateConnection(name.to_string()));
        }

        let conn = DbConnection::open(name, dsn)?;
        self.connections.insert(name.to_string(), Arc::new(conn));
        info!(
            "event=conn_register module=registry status=ok name={} total={}",
            name,
            self.connections.len()
        );
        Ok(())
    }

    /// In-memory variant of `register`, for tests and scratch databases.
    pub fn register_in_memory(&mut self, name: &str) -> DbResult<()> {
        if self.connections.contains_key(name) {
            return Err(DbError::DuplicateConnection(name.to_string()));
        }

        let conn = DbConnection::open_in_memory(name)?;
        self.connections.insert(name.to_string(), Arc::new(conn));
        info!(
            "event=conn_register module=registry status=ok name={} mode=memory total={}",
            name,
            self.connections.len()
        );
        Ok(())
    }

    /// Looks up a registered connection. Repeated calls with the same
    /// name return the same instance.
    ///
    /// # Errors
    /// - `UnknownConnection` when `name` was never registered.
    pub fn get(&self, name: &str) -> DbResult<Arc<DbConnection>> {
        self.connections
            .get(name)
            .cloned()
            .ok_or_else(|| DbError::UnknownConnection(name.to_string()))
    }

    /// [`get`](Self::get) with the conventional `"default"` name.
    pub fn get_default(&self) -> DbResult<Arc<DbConnection>> {
        self.get(DEFAULT_CONNECTION)
    }

    /// Returns registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.connections.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
