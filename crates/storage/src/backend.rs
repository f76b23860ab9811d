//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use healthstat_core::{
    AggregateStats, Observation, ObservationFilter, StoreConfig, StoreTarget, YearStats,
};

use crate::error::StorageError;
use crate::index::IndexStatus;
use crate::traits::{AggregateStore, IndexStore, LoadLockStore, ObservationStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::Storage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::Storage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    /// Open the store `config` points at, with its pool settings.
    ///
    /// # Errors
    /// `Unavailable` when the store cannot be reached, `Migration` when the
    /// schema cannot be set up, or `Unsupported` when the backend was
    /// compiled out.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, StorageError> {
        match &config.target {
            #[cfg(feature = "sqlite")]
            StoreTarget::Sqlite(path) => {
                let path = path.clone();
                let (max, timeout) = (config.max_connections, config.acquire_timeout_secs);
                let storage = tokio::task::spawn_blocking(move || {
                    crate::Storage::with_pool(&path, max, timeout)
                })
                .await??;
                Ok(Self::Sqlite(storage))
            },
            #[cfg(feature = "postgres")]
            StoreTarget::Postgres(url) => Ok(Self::Postgres(
                crate::pg_storage::PgStorage::with_pool(
                    url,
                    config.max_connections,
                    config.acquire_timeout_secs,
                )
                .await?,
            )),
            #[allow(unreachable_patterns, reason = "reachable when a backend feature is off")]
            other => Err(StorageError::Unsupported(other.kind())),
        }
    }

    /// Name of the active backend, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── ObservationStore ─────────────────────────────────────────────

#[async_trait]
impl ObservationStore for StorageBackend {
    async fn insert_batch(&self, rows: &[Observation]) -> Result<usize, StorageError> {
        dispatch!(self, ObservationStore, insert_batch(rows))
    }

    async fn select(
        &self,
        filter: &ObservationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Observation>, StorageError> {
        dispatch!(self, ObservationStore, select(filter, limit))
    }

    async fn clear(&self) -> Result<usize, StorageError> {
        dispatch!(self, ObservationStore, clear())
    }
}

// ── IndexStore ───────────────────────────────────────────────────

#[async_trait]
impl IndexStore for StorageBackend {
    async fn ensure_index(&self) -> Result<IndexStatus, StorageError> {
        dispatch!(self, IndexStore, ensure_index())
    }

    async fn index_exists(&self) -> Result<bool, StorageError> {
        dispatch!(self, IndexStore, index_exists())
    }
}

// ── LoadLockStore ────────────────────────────────────────────────

#[async_trait]
impl LoadLockStore for StorageBackend {
    async fn try_lock_load(&self, holder: &str) -> Result<bool, StorageError> {
        dispatch!(self, LoadLockStore, try_lock_load(holder))
    }

    async fn unlock_load(&self, holder: &str) -> Result<(), StorageError> {
        dispatch!(self, LoadLockStore, unlock_load(holder))
    }
}

// ── AggregateStore ───────────────────────────────────────────────

#[async_trait]
impl AggregateStore for StorageBackend {
    async fn aggregate(&self, filter: &ObservationFilter) -> Result<AggregateStats, StorageError> {
        dispatch!(self, AggregateStore, aggregate(filter))
    }

    async fn aggregate_by_year(
        &self,
        filter: &ObservationFilter,
    ) -> Result<Vec<YearStats>, StorageError> {
        dispatch!(self, AggregateStore, aggregate_by_year(filter))
    }
}
