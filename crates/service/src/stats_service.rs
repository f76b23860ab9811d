use std::sync::Arc;

use healthstat_core::{AggregateStats, ObservationFilter, YearStats};
use healthstat_storage::StorageBackend;
use healthstat_storage::traits::AggregateStore;

use crate::ServiceError;

/// Summary statistics over one (disease, indicator) pair.
pub struct StatsService<S = StorageBackend> {
    storage: Arc<S>,
}

impl<S: AggregateStore> StatsService<S> {
    #[must_use]
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// `{count, nonNullCount, min, max, mean}` for the pair.
    ///
    /// `NotFound` only when no row matches at all; a pair whose rows all have
    /// null values returns `count > 0` with undefined min/max/mean.
    pub async fn stats(&self, disease: &str, indicator: &str) -> Result<AggregateStats, ServiceError> {
        let filter = pair_filter(disease, indicator)?;
        let stats = self.storage.aggregate(&filter).await?;
        if stats.is_empty() {
            return Err(not_found(&filter));
        }
        tracing::debug!(disease, indicator, count = stats.count, "stats computed");
        Ok(stats)
    }

    /// The same statistics broken down per year, oldest first.
    pub async fn stats_by_year(
        &self,
        disease: &str,
        indicator: &str,
    ) -> Result<Vec<YearStats>, ServiceError> {
        let filter = pair_filter(disease, indicator)?;
        let per_year = self.storage.aggregate_by_year(&filter).await?;
        if per_year.is_empty() {
            return Err(not_found(&filter));
        }
        Ok(per_year)
    }
}

fn pair_filter(disease: &str, indicator: &str) -> Result<ObservationFilter, ServiceError> {
    let disease = disease.trim();
    let indicator = indicator.trim();
    if disease.is_empty() || indicator.is_empty() {
        return Err(ServiceError::InvalidInput(
            "both disease and indicator are required".to_owned(),
        ));
    }
    Ok(ObservationFilter::pair(disease, indicator))
}

fn not_found(filter: &ObservationFilter) -> ServiceError {
    ServiceError::NotFound {
        disease: filter.disease.clone().unwrap_or_default(),
        indicator: filter.indicator.clone().unwrap_or_default(),
    }
}
