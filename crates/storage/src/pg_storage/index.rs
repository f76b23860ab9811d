//! IndexStore implementation for PgStorage.

use super::*;

use crate::index::IndexStatus;
use crate::traits::IndexStore;
use async_trait::async_trait;

#[async_trait]
impl IndexStore for PgStorage {
    async fn ensure_index(&self) -> Result<IndexStatus, StorageError> {
        if self.index_exists().await? {
            tracing::debug!(index = OBSERVATION_INDEX.name, "index already present");
            return Ok(IndexStatus::AlreadyPresent);
        }
        sqlx::query(&OBSERVATION_INDEX.create_sql(Dialect::Postgres)).execute(&self.pool).await?;
        tracing::info!(index = OBSERVATION_INDEX.name, "index created");
        Ok(IndexStatus::Created)
    }

    async fn index_exists(&self) -> Result<bool, StorageError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM pg_indexes
                 WHERE schemaname = current_schema() AND tablename = $1 AND indexname = $2
             )",
        )
        .bind(OBSERVATION_INDEX.table)
        .bind(OBSERVATION_INDEX.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
