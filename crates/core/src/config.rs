//! Explicit configuration passed into storage and service constructors.
//!
//! Nothing here is global: callers build a config (usually via `from_env`)
//! and hand it to whatever needs it.

use std::path::PathBuf;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS, DEFAULT_POOL_MAX_CONNECTIONS,
    MAX_BATCH_SIZE,
};
use crate::env_config::{env_non_empty, env_parse_with_default};

/// Which store the process talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// On-disk SQLite database file.
    Sqlite(PathBuf),
    /// PostgreSQL connection URL.
    Postgres(String),
}

impl StoreTarget {
    /// Pick a target from a connection string.
    ///
    /// `postgres://` and `postgresql://` URLs select PostgreSQL, a
    /// `sqlite://` prefix is stripped, anything else is a file path.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Self::Postgres(url.to_owned())
        } else {
            Self::Sqlite(PathBuf::from(url.strip_prefix("sqlite://").unwrap_or(url)))
        }
    }

    /// Short backend label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::Postgres(_) => "postgres",
        }
    }
}

/// Store connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub target: StoreTarget,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long an operation waits for a pooled connection before failing.
    pub acquire_timeout_secs: u64,
}

impl StoreConfig {
    #[must_use]
    pub fn new(target: StoreTarget) -> Self {
        Self {
            target,
            max_connections: DEFAULT_POOL_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreTarget::Sqlite(path.into()))
    }

    #[must_use]
    pub fn postgres(url: impl Into<String>) -> Self {
        Self::new(StoreTarget::Postgres(url.into()))
    }

    /// Build from the environment.
    ///
    /// `DATABASE_URL` wins, then `HEALTHSTAT_DB_PATH`, then the default
    /// database file under the local data directory.
    #[must_use]
    pub fn from_env() -> Self {
        let target = if let Some(url) = env_non_empty("DATABASE_URL") {
            StoreTarget::from_url(&url)
        } else if let Some(path) = env_non_empty("HEALTHSTAT_DB_PATH") {
            StoreTarget::Sqlite(PathBuf::from(path))
        } else {
            StoreTarget::Sqlite(default_db_path())
        };
        Self {
            target,
            max_connections: env_parse_with_default(
                "HEALTHSTAT_DB_POOL_SIZE",
                DEFAULT_POOL_MAX_CONNECTIONS,
            )
            .max(1),
            acquire_timeout_secs: env_parse_with_default(
                "HEALTHSTAT_DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS,
            )
            .max(1),
        }
    }

    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    #[must_use]
    pub fn with_acquire_timeout_secs(mut self, secs: u64) -> Self {
        self.acquire_timeout_secs = secs.max(1);
        self
    }
}

/// Default SQLite location: `<data_local_dir>/healthstat/observations.db`.
#[must_use]
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("healthstat")
        .join("observations.db")
}

/// Loader tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Rows per insert batch, always within `1..=MAX_BATCH_SIZE`.
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { batch_size: DEFAULT_BATCH_SIZE }
    }
}

impl LoaderConfig {
    #[must_use]
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size: batch_size.clamp(1, MAX_BATCH_SIZE) }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(env_parse_with_default("HEALTHSTAT_LOAD_BATCH_SIZE", DEFAULT_BATCH_SIZE))
    }
}
