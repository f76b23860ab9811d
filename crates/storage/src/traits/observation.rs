use async_trait::async_trait;
use healthstat_core::{Observation, ObservationFilter};

use crate::error::StorageError;

/// Bulk writes and filtered reads over observation rows.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Insert a batch in one round trip. Returns the number of rows written.
    async fn insert_batch(&self, rows: &[Observation]) -> Result<usize, StorageError>;

    /// Rows matching `filter`, at most `limit` of them when given.
    ///
    /// An empty filter selects every row.
    async fn select(
        &self,
        filter: &ObservationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Observation>, StorageError>;

    /// Delete every observation. Returns the number of rows removed.
    async fn clear(&self) -> Result<usize, StorageError>;
}
