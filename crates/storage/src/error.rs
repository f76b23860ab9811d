//! Typed error enum for the storage layer.
//!
//! Callers match on the failure mode instead of downcasting: in particular
//! an unreachable or timed-out store (`Unavailable`) is kept apart from SQL
//! failures so it can be surfaced as its own error kind.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Pool acquire timeout, closed pool, I/O or connection failure.
    #[error("store unavailable: {0}")]
    Unavailable(#[source] BoxError),

    /// SQLite statement failure.
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    /// PostgreSQL statement failure.
    #[cfg(feature = "postgres")]
    #[error("postgres error: {0}")]
    Postgres(#[source] sqlx::Error),

    /// Row data could not be mapped onto the domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Schema setup failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// The configured backend was not compiled into this build.
    #[error("storage backend `{0}` is not enabled in this build")]
    Unsupported(&'static str),

    /// Blocking task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(String),
}

impl StorageError {
    /// Whether the store could not be reached in time (timeout or connectivity).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// `SQLITE_BUSY` / `SQLITE_LOCKED` after `busy_timeout` elapsed and
/// `SQLITE_CANTOPEN` are reported as `Unavailable`; everything else is a
/// statement failure.
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;
        match &err {
            rusqlite::Error::SqliteFailure(ffi, _)
                if matches!(
                    ffi.code,
                    ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen
                ) =>
            {
                Self::Unavailable(Box::new(err))
            },
            _ => Self::Sqlite(err),
        }
    }
}

/// `r2d2` only fails `get()` when no connection could be produced in time.
#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::Unavailable(Box::new(err))
    }
}

/// Custom `From<sqlx::Error>` rather than blanket `#[from]`:
/// pool timeouts and transport failures become `Unavailable`.
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => Self::Unavailable(Box::new(err)),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::DataCorruption(err.to_string())
            },
            other => Self::Postgres(other),
        }
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}
