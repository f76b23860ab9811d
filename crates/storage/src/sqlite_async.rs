//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use healthstat_core::{AggregateStats, Observation, ObservationFilter, YearStats};

use crate::Storage;
use crate::error::StorageError;
use crate::index::IndexStatus;
use crate::traits::{AggregateStore, IndexStore, LoadLockStore, ObservationStore};

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@slice arg`: `.to_vec()` a `&[T]`, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`: move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture slice $arg:ident) => { let $arg = $arg.to_vec(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass slice $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── ObservationStore ─────────────────────────────────────────────

#[async_trait]
impl ObservationStore for Storage {
    async fn insert_batch(&self, rows: &[Observation]) -> Result<usize, StorageError> {
        delegate!(self, insert_batch, @slice rows)
    }
    async fn select(
        &self,
        filter: &ObservationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Observation>, StorageError> {
        delegate!(self, select, @ref filter, @val limit)
    }
    async fn clear(&self) -> Result<usize, StorageError> {
        delegate!(self, clear)
    }
}

// ── IndexStore ───────────────────────────────────────────────────

#[async_trait]
impl IndexStore for Storage {
    async fn ensure_index(&self) -> Result<IndexStatus, StorageError> {
        delegate!(self, ensure_index)
    }
    async fn index_exists(&self) -> Result<bool, StorageError> {
        delegate!(self, index_exists)
    }
}

// ── LoadLockStore ────────────────────────────────────────────────

#[async_trait]
impl LoadLockStore for Storage {
    async fn try_lock_load(&self, holder: &str) -> Result<bool, StorageError> {
        delegate!(self, try_lock_load, @str holder)
    }
    async fn unlock_load(&self, holder: &str) -> Result<(), StorageError> {
        delegate!(self, unlock_load, @str holder)
    }
}

// ── AggregateStore ───────────────────────────────────────────────

#[async_trait]
impl AggregateStore for Storage {
    async fn aggregate(&self, filter: &ObservationFilter) -> Result<AggregateStats, StorageError> {
        delegate!(self, aggregate, @ref filter)
    }
    async fn aggregate_by_year(
        &self,
        filter: &ObservationFilter,
    ) -> Result<Vec<YearStats>, StorageError> {
        delegate!(self, aggregate_by_year, @ref filter)
    }
}
