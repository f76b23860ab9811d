use async_trait::async_trait;
use healthstat_core::{AggregateStats, ObservationFilter, YearStats};

use crate::error::StorageError;

/// Aggregates computed by the store over a filtered subset.
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// count, non-null count, min, max and mean of `value` over matching rows.
    async fn aggregate(&self, filter: &ObservationFilter) -> Result<AggregateStats, StorageError>;

    /// Same as [`aggregate`](Self::aggregate), grouped by year in ascending order.
    async fn aggregate_by_year(
        &self,
        filter: &ObservationFilter,
    ) -> Result<Vec<YearStats>, StorageError>;
}
