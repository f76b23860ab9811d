//! ObservationStore implementation for PgStorage.

use super::*;

use crate::traits::ObservationStore;
use async_trait::async_trait;

#[async_trait]
impl ObservationStore for PgStorage {
    async fn insert_batch(&self, rows: &[Observation]) -> Result<usize, StorageError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "INSERT INTO observations (disease, indicator, year, value, region, unit) ",
        );
        qb.push_values(rows, |mut b, obs| {
            b.push_bind(obs.disease.clone())
                .push_bind(obs.indicator.clone())
                .push_bind(obs.year)
                .push_bind(obs.value)
                .push_bind(obs.region.clone())
                .push_bind(obs.unit.clone());
        });
        let result = qb.build().execute(&self.pool).await?;
        Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
    }

    async fn select(
        &self,
        filter: &ObservationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Observation>, StorageError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT disease, indicator, year, value, region, unit FROM observations",
        );
        push_predicate(&mut qb, filter);
        qb.push(" ORDER BY year DESC, id");
        if let Some(limit) = limit {
            qb.push(" LIMIT ").push_bind(usize_to_i64(limit));
        }
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_observation).collect()
    }

    async fn clear(&self) -> Result<usize, StorageError> {
        let result = sqlx::query("DELETE FROM observations").execute(&self.pool).await?;
        let removed = usize::try_from(result.rows_affected()).unwrap_or(usize::MAX);
        tracing::info!(removed, "Cleared observations table");
        Ok(removed)
    }
}
