//! Bulk loader.
//!
//! A single coarse-grained writer per store, enforced by a lock kept in the
//! store itself: rows are validated one by one, inserted in bounded batches,
//! and the composite index is ensured once the data is in. Reads never take
//! the lock and may see a partially loaded table.

mod ingest;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use healthstat_core::{LoaderConfig, RawRow};
use healthstat_storage::traits::{IndexStore, LoadLockStore, ObservationStore};
use healthstat_storage::{IndexStatus, StorageBackend};
use tokio::sync::mpsc;
use uuid::Uuid;

pub use ingest::LoadReport;
use ingest::Ingest;

use crate::ServiceError;
use crate::dataset::{CsvSource, SourceItem};

/// Store-wide load lock for one run.
///
/// Must be released with [`LoadLock::release`]; a loader that dies while
/// holding it leaves the lock to expire as stale.
struct LoadLock<'a, S: LoadLockStore> {
    storage: &'a S,
    holder: String,
}

impl<'a, S: LoadLockStore> LoadLock<'a, S> {
    async fn acquire(storage: &'a S) -> Result<Self, ServiceError> {
        let holder = format!("{}:{}", std::process::id(), Uuid::new_v4());
        if !storage.try_lock_load(&holder).await? {
            return Err(ServiceError::LoadInProgress);
        }
        tracing::debug!(holder = %holder, "load lock acquired");
        Ok(Self { storage, holder })
    }

    async fn release(self) {
        if let Err(e) = self.storage.unlock_load(&self.holder).await {
            tracing::warn!(holder = %self.holder, error = %e, "failed to release load lock");
        }
    }
}

pub struct LoadService<S = StorageBackend> {
    storage: Arc<S>,
    config: LoaderConfig,
}

impl<S> LoadService<S>
where
    S: ObservationStore + IndexStore + LoadLockStore,
{
    #[must_use]
    pub fn new(storage: Arc<S>, config: LoaderConfig) -> Self {
        Self { storage, config }
    }

    /// Create the composite index unless it exists.
    pub async fn ensure_index(&self) -> Result<IndexStatus, ServiceError> {
        self.storage.ensure_index().await.map_err(ServiceError::IndexCreation)
    }

    /// Load already-parsed rows. Line numbers in logs are 1-based positions
    /// in `rows`.
    ///
    /// Fails with `LoadInProgress` while any other loader, in this process
    /// or another, holds the store's load lock.
    pub async fn load_rows<I>(&self, rows: I) -> Result<LoadReport, ServiceError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let lock = LoadLock::acquire(self.storage.as_ref()).await?;
        let result = self.ingest_rows(rows).await;
        lock.release().await;
        result
    }

    async fn ingest_rows<I>(&self, rows: I) -> Result<LoadReport, ServiceError>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let started = Instant::now();

        let mut ingest = Ingest::new(self.storage.as_ref(), self.config.batch_size);
        for (line, row) in (1_u64..).zip(rows) {
            ingest.accept(line, &row).await?;
        }
        let report = ingest.finish().await?;

        self.complete(report, started).await
    }

    /// Load a CSV dataset from `path`.
    ///
    /// With `replace`, existing observations are deleted first (after the
    /// header has been validated, so a bad file leaves the table alone).
    pub async fn load_path(
        &self,
        path: impl AsRef<Path>,
        replace: bool,
    ) -> Result<LoadReport, ServiceError> {
        let path = path.as_ref().to_path_buf();
        let lock = LoadLock::acquire(self.storage.as_ref()).await?;
        let result = self.ingest_path(path, replace).await;
        lock.release().await;
        result
    }

    async fn ingest_path(&self, path: PathBuf, replace: bool) -> Result<LoadReport, ServiceError> {
        let started = Instant::now();
        tracing::info!(path = %path.display(), replace, "loading dataset");

        let source = tokio::task::spawn_blocking(move || CsvSource::open(&path)).await??;

        let mut ingest = Ingest::new(self.storage.as_ref(), self.config.batch_size);
        if replace {
            let removed = self.storage.clear().await.map_err(|e| ingest.abort(e))?;
            tracing::info!(removed, "existing observations removed");
        }

        let (tx, mut rx) = mpsc::channel(self.config.batch_size);
        let reader = tokio::task::spawn_blocking(move || source.stream(&tx));

        while let Some(item) = rx.recv().await {
            match item {
                SourceItem::Row { line, row } => ingest.accept(line, &row).await?,
                SourceItem::Unreadable { line, reason } => ingest.skip(line, &reason),
            }
        }
        // Rows read before a mid-file I/O failure are flushed, then the failure surfaces.
        let report = ingest.finish().await?;
        if let Err(e) = reader.await? {
            tracing::warn!(
                inserted = report.inserted,
                skipped = report.skipped,
                error = %e,
                "dataset read failed mid-file"
            );
            return Err(e);
        }

        self.complete(report, started).await
    }

    async fn complete(
        &self,
        report: LoadReport,
        started: Instant,
    ) -> Result<LoadReport, ServiceError> {
        let index = self.ensure_index().await?;
        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            ?index,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "load complete"
        );
        Ok(report)
    }
}
