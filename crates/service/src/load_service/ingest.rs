//! Row validation and batched insertion shared by every load entry point.

use std::fmt::Display;

use healthstat_core::{Observation, RawRow};
use healthstat_storage::StorageError;
use healthstat_storage::traits::ObservationStore;
use serde::Serialize;

use crate::ServiceError;

/// Outcome of a completed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub inserted: u64,
    pub skipped: u64,
}

fn to_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// Accumulates validated rows and flushes them in fixed-size batches.
pub(super) struct Ingest<'a, S: ?Sized> {
    storage: &'a S,
    batch: Vec<Observation>,
    batch_size: usize,
    inserted: u64,
    skipped: u64,
}

impl<'a, S: ObservationStore + ?Sized> Ingest<'a, S> {
    pub(super) fn new(storage: &'a S, batch_size: usize) -> Self {
        Self { storage, batch: Vec::with_capacity(batch_size), batch_size, inserted: 0, skipped: 0 }
    }

    /// Validate one row; queue it or count it as skipped.
    pub(super) async fn accept(&mut self, line: u64, row: &RawRow) -> Result<(), ServiceError> {
        match Observation::from_raw(row) {
            Ok(obs) => {
                self.batch.push(obs);
                if self.batch.len() >= self.batch_size {
                    self.flush().await?;
                }
            },
            Err(reason) => self.skip(line, &reason),
        }
        Ok(())
    }

    pub(super) fn skip(&mut self, line: u64, reason: &dyn Display) {
        self.skipped += 1;
        tracing::debug!(line, %reason, "row skipped");
    }

    async fn flush(&mut self) -> Result<(), ServiceError> {
        if self.batch.is_empty() {
            return Ok(());
        }
        match self.storage.insert_batch(&self.batch).await {
            Ok(written) => {
                self.inserted += to_u64(written);
                tracing::debug!(batch = written, inserted = self.inserted, "batch inserted");
                self.batch.clear();
                Ok(())
            },
            Err(source) => Err(self.abort(source)),
        }
    }

    /// Fatal store failure: report what was settled before it.
    pub(super) fn abort(&self, source: StorageError) -> ServiceError {
        ServiceError::Load {
            processed: self.inserted + self.skipped,
            inserted: self.inserted,
            skipped: self.skipped,
            source,
        }
    }

    /// Flush the tail batch.
    pub(super) async fn finish(mut self) -> Result<LoadReport, ServiceError> {
        self.flush().await?;
        Ok(LoadReport { inserted: self.inserted, skipped: self.skipped })
    }
}
