use std::sync::Arc;

use healthstat_core::{Observation, ObservationFilter};
use healthstat_storage::StorageBackend;
use healthstat_storage::traits::ObservationStore;

use crate::ServiceError;

/// Filtered observation lookups. Stateless; safe to share across requests.
pub struct QueryService<S = StorageBackend> {
    storage: Arc<S>,
}

impl<S: ObservationStore> QueryService<S> {
    #[must_use]
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Every observation matching `filter`; the empty filter returns the
    /// whole dataset.
    pub async fn find(&self, filter: &ObservationFilter) -> Result<Vec<Observation>, ServiceError> {
        self.find_limited(filter, None).await
    }

    pub async fn find_limited(
        &self,
        filter: &ObservationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Observation>, ServiceError> {
        let rows = self.storage.select(filter, limit).await?;
        tracing::debug!(
            ?filter,
            unfiltered = filter.is_empty(),
            limit,
            matched = rows.len(),
            "observation lookup"
        );
        Ok(rows)
    }

    /// Lookup from raw request parameters; a non-integer `year` is an
    /// [`ServiceError::InvalidFilter`].
    pub async fn find_params(
        &self,
        disease: Option<&str>,
        indicator: Option<&str>,
        year: Option<&str>,
        region: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<Observation>, ServiceError> {
        let filter = ObservationFilter::from_params(disease, indicator, year, region)?;
        self.find_limited(&filter, limit).await
    }
}
