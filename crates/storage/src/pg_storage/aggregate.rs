//! AggregateStore implementation for PgStorage.

use super::*;

use crate::traits::AggregateStore;
use async_trait::async_trait;
use healthstat_core::YearStats;

const AGGREGATE_COLUMNS: &str = "COUNT(*) AS count, COUNT(value) AS non_null_count, \
     MIN(value) AS min, MAX(value) AS max, AVG(value) AS mean";

#[async_trait]
impl AggregateStore for PgStorage {
    async fn aggregate(&self, filter: &ObservationFilter) -> Result<AggregateStats, StorageError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT ");
        qb.push(AGGREGATE_COLUMNS).push(" FROM observations");
        push_predicate(&mut qb, filter);
        let row = qb.build().fetch_one(&self.pool).await?;
        row_to_stats(&row)
    }

    async fn aggregate_by_year(
        &self,
        filter: &ObservationFilter,
    ) -> Result<Vec<YearStats>, StorageError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT year, ");
        qb.push(AGGREGATE_COLUMNS).push(" FROM observations");
        push_predicate(&mut qb, filter);
        qb.push(" GROUP BY year ORDER BY year");
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| -> Result<YearStats, StorageError> {
                Ok(YearStats { year: row.try_get("year")?, stats: row_to_stats(row)? })
            })
            .collect()
    }
}
