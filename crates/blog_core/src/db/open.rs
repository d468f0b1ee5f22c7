//! Store bootstrap for file-backed and in-memory SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by the store.
//! - Trigger schema migrations before returning a usable handle.
//!
//! # Invariants
//! - Returned handles have migrations fully applied.
//! - Returned handles have `busy_timeout` set from `StoreOptions`.

use super::migrations::apply_migrations;
use super::{DbResult, DocumentStore, StoreOptions};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

const IN_MEMORY_LOCATION: &str = ":memory:";

/// Opens (creating if needed) a file-backed store and applies migrations.
///
/// The path `:memory:` opens a private in-memory store instead.
///
/// # Side effects
/// - Emits `store_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>, options: &StoreOptions) -> DbResult<DocumentStore> {
    let path = path.as_ref();
    let location = path.display().to_string();
    if location == IN_MEMORY_LOCATION {
        return open_with(Connection::open_in_memory(), "memory", location, options);
    }
    open_with(Connection::open(path), "file", location, options)
}

/// Opens a private in-memory store with default options.
pub fn open_store_in_memory() -> DbResult<DocumentStore> {
    open_with(
        Connection::open_in_memory(),
        "memory",
        IN_MEMORY_LOCATION.to_string(),
        &StoreOptions::default(),
    )
}

fn open_with(
    opened: rusqlite::Result<Connection>,
    mode: &str,
    location: String,
    options: &StoreOptions,
) -> DbResult<DocumentStore> {
    let started_at = Instant::now();
    info!("event=store_open module=db status=start mode={mode} location={location}");

    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=store_open module=db status=error mode={mode} duration_ms={} error_code=store_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, options) {
        Ok(()) => {
            info!(
                "event=store_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(DocumentStore::from_connection(conn, location))
        }
        Err(err) => {
            error!(
                "event=store_open module=db status=error mode={mode} duration_ms={} error_code=store_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, options: &StoreOptions) -> DbResult<()> {
    conn.busy_timeout(options.busy_timeout)?;
    apply_migrations(conn)?;
    Ok(())
}
