//! `SQLite` storage implementation
//!
//! All methods are synchronous; `sqlite_async` lifts them onto the async
//! capability traits through `spawn_blocking`.

// SQLite uses i64 for counts/limits, Rust uses usize - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]

mod aggregate;
mod index;
mod load_lock;
mod observations;
mod predicate;

use std::path::Path;
use std::time::Duration;

use healthstat_core::{DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS, DEFAULT_POOL_MAX_CONNECTIONS};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool.
///
/// The connection goes back to the pool when the guard drops, whichever way
/// the caller returns.
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Map a row read failure: values that cannot be decoded into the record
/// are `DataCorruption`, anything else keeps its usual mapping.
pub(crate) fn row_error(err: rusqlite::Error) -> StorageError {
    match err {
        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => {
            StorageError::DataCorruption(err.to_string())
        },
        other => other.into(),
    }
}

/// Per-connection settings for concurrency
fn init_connection(conn: &mut Connection, busy_timeout_ms: u64) -> Result<(), rusqlite::Error> {
    conn.execute_batch(&format!(
        "PRAGMA busy_timeout = {busy_timeout_ms};
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;"
    ))?;
    Ok(())
}

impl Storage {
    /// Create new storage instance with default pool settings
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        Self::with_pool(db_path, DEFAULT_POOL_MAX_CONNECTIONS, DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS)
    }

    /// Create new storage instance with an explicit pool size and acquire timeout.
    ///
    /// The same timeout bounds both waiting for a pooled connection and
    /// waiting on SQLite's write lock.
    pub fn with_pool(
        db_path: &Path,
        max_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StorageError::Unavailable(Box::new(e)))?;
        }

        let busy_timeout_ms = acquire_timeout_secs.saturating_mul(1000);
        let manager = SqliteConnectionManager::file(db_path)
            .with_init(move |conn| init_connection(conn, busy_timeout_ms));

        let pool = Pool::builder()
            .max_size(max_connections.max(1))
            .connection_timeout(Duration::from_secs(acquire_timeout_secs.max(1)))
            .build(manager)?;

        let conn = get_conn(&pool)?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(
            path = %db_path.display(),
            pool_size = max_connections,
            "SQLite storage initialized"
        );

        Ok(Self { pool })
    }
}
