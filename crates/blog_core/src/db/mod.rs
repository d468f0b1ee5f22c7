//! Embedded document store over SQLite.
//!
//! # Responsibility
//! - Open and configure the SQLite database backing all collections.
//! - Apply schema migrations in deterministic order.
//! - Expose a thread-safe store handle shared by every in-flight call.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Documents are never read or written before migrations succeed.
//! - The store handle owns exactly one connection for its whole lifetime.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

mod collection;
pub mod migrations;
mod object_id;
mod open;

pub use collection::Collection;
pub use object_id::{ObjectId, ObjectIdError};
pub use open::{open_store, open_store_in_memory};

pub type DbResult<T> = Result<T, DbError>;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Document body could not be encoded to or decoded from JSON.
    Document(serde_json::Error),
    /// A previous holder of the connection panicked mid-operation.
    Poisoned,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Document(err) => write!(f, "invalid document body: {err}"),
            Self::Poisoned => write!(f, "store connection lock poisoned"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Document(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Poisoned => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for DbError {
    fn from(value: serde_json::Error) -> Self {
        Self::Document(value)
    }
}

/// Connection tuning applied when a store is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Upper bound on how long a statement waits for the database lock.
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

/// Process-wide handle to the document store.
///
/// The handle is `Send + Sync` and meant to be shared behind an `Arc`; it
/// serializes access to its single connection internally so callers never
/// lock anything themselves.
#[derive(Debug)]
pub struct DocumentStore {
    conn: Mutex<Connection>,
    location: String,
}

impl DocumentStore {
    pub(crate) fn from_connection(conn: Connection, location: impl Into<String>) -> Self {
        Self {
            conn: Mutex::new(conn),
            location: location.into(),
        }
    }

    /// Human-readable location (file path or `:memory:`) used in logs.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns a view over one named collection of this store.
    pub fn collection<'store>(&'store self, name: &'store str) -> Collection<'store> {
        Collection::new(self, name)
    }

    /// Closes the underlying connection, flushing any pending state.
    pub fn close(self) -> DbResult<()> {
        let conn = self.conn.into_inner().map_err(|_| DbError::Poisoned)?;
        conn.close().map_err(|(_, err)| DbError::Sqlite(err))
    }

    pub(crate) fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }
}
