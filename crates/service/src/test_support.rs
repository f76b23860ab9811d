//! Shared fixtures for service tests.

#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use healthstat_core::{AggregateStats, Observation, ObservationFilter, RawRow, YearStats};
use healthstat_storage::traits::{AggregateStore, IndexStore, LoadLockStore, ObservationStore};
use healthstat_storage::{IndexStatus, Storage, StorageError};
use tempfile::TempDir;

pub(crate) fn sqlite_store() -> (Arc<Storage>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(&temp_dir.path().join("test.db")).unwrap();
    (Arc::new(storage), temp_dir)
}

pub(crate) fn raw(disease: &str, indicator: &str, year: &str, value: &str) -> RawRow {
    RawRow::from_pairs([
        ("disease", disease),
        ("indicator", indicator),
        ("year", year),
        ("value", value),
    ])
}

/// Store whose writes fail after a set number of successful batches, whose
/// index creation can be made to fail, and whose inserts can be slowed down.
#[derive(Default)]
pub(crate) struct FlakyStore {
    pub(crate) ok_batches: Option<usize>,
    pub(crate) fail_index: bool,
    pub(crate) insert_delay: Option<Duration>,
    pub(crate) batches: AtomicUsize,
    pub(crate) rows: AtomicUsize,
    pub(crate) load_lock: Mutex<Option<String>>,
}

impl FlakyStore {
    pub(crate) fn is_load_locked(&self) -> bool {
        self.load_lock.lock().unwrap().is_some()
    }
}

fn unavailable() -> StorageError {
    StorageError::Unavailable("connection refused".into())
}

#[async_trait]
impl ObservationStore for FlakyStore {
    async fn insert_batch(&self, rows: &[Observation]) -> Result<usize, StorageError> {
        if let Some(delay) = self.insert_delay {
            tokio::time::sleep(delay).await;
        }
        if self.ok_batches.is_some_and(|ok| self.batches.load(Ordering::SeqCst) >= ok) {
            return Err(unavailable());
        }
        self.batches.fetch_add(1, Ordering::SeqCst);
        self.rows.fetch_add(rows.len(), Ordering::SeqCst);
        Ok(rows.len())
    }

    async fn select(
        &self,
        _filter: &ObservationFilter,
        _limit: Option<usize>,
    ) -> Result<Vec<Observation>, StorageError> {
        Err(unavailable())
    }

    async fn clear(&self) -> Result<usize, StorageError> {
        Ok(self.rows.swap(0, Ordering::SeqCst))
    }
}

#[async_trait]
impl IndexStore for FlakyStore {
    async fn ensure_index(&self) -> Result<IndexStatus, StorageError> {
        if self.fail_index {
            return Err(StorageError::Migration("permission denied to create index".to_owned()));
        }
        Ok(IndexStatus::Created)
    }

    async fn index_exists(&self) -> Result<bool, StorageError> {
        Ok(false)
    }
}

#[async_trait]
impl LoadLockStore for FlakyStore {
    async fn try_lock_load(&self, holder: &str) -> Result<bool, StorageError> {
        let mut lock = self.load_lock.lock().unwrap();
        if lock.is_some() {
            return Ok(false);
        }
        *lock = Some(holder.to_owned());
        Ok(true)
    }

    async fn unlock_load(&self, holder: &str) -> Result<(), StorageError> {
        let mut lock = self.load_lock.lock().unwrap();
        if lock.as_deref() == Some(holder) {
            *lock = None;
        }
        Ok(())
    }
}

#[async_trait]
impl AggregateStore for FlakyStore {
    async fn aggregate(&self, _filter: &ObservationFilter) -> Result<AggregateStats, StorageError> {
        Err(unavailable())
    }

    async fn aggregate_by_year(
        &self,
        _filter: &ObservationFilter,
    ) -> Result<Vec<YearStats>, StorageError> {
        Err(unavailable())
    }
}
