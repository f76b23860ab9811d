use anyhow::Result;
use healthstat_service::{QueryService, StatsService};
use healthstat_storage::StorageBackend;
use std::sync::Arc;

use crate::{FilterArgs, PairArgs, print_json};

pub(crate) async fn run_query(
    storage: Arc<StorageBackend>,
    filter: &FilterArgs,
    limit: Option<usize>,
) -> Result<()> {
    let rows = QueryService::new(storage)
        .find_params(
            filter.disease.as_deref(),
            filter.indicator.as_deref(),
            filter.year.as_deref(),
            filter.region.as_deref(),
            limit,
        )
        .await?;
    print_json(&rows)
}

pub(crate) async fn run_stats(storage: Arc<StorageBackend>, pair: &PairArgs) -> Result<()> {
    let stats = StatsService::new(storage).stats(&pair.disease, &pair.indicator).await?;
    print_json(&stats)
}

pub(crate) async fn run_stats_by_year(storage: Arc<StorageBackend>, pair: &PairArgs) -> Result<()> {
    let per_year = StatsService::new(storage).stats_by_year(&pair.disease, &pair.indicator).await?;
    print_json(&per_year)
}
