//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by capability.

mod aggregate;
mod index;
mod load_lock;
mod observations;

use std::time::Duration;

use healthstat_core::{
    AggregateStats, DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS, DEFAULT_POOL_MAX_CONNECTIONS, Observation,
    ObservationFilter, PG_POOL_IDLE_TIMEOUT_SECS,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::error::StorageError;
use crate::index::{Dialect, OBSERVATION_INDEX};

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        Self::with_pool(database_url, DEFAULT_POOL_MAX_CONNECTIONS, DEFAULT_POOL_ACQUIRE_TIMEOUT_SECS)
            .await
    }

    pub async fn with_pool(
        database_url: &str,
        max_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs.max(1)))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!(pool_size = max_connections, "PgStorage initialized");
        Ok(Self { pool })
    }
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

pub(crate) fn row_to_observation(row: &PgRow) -> Result<Observation, StorageError> {
    Ok(Observation {
        disease: row.try_get("disease")?,
        indicator: row.try_get("indicator")?,
        year: row.try_get("year")?,
        value: row.try_get("value")?,
        region: row.try_get("region")?,
        unit: row.try_get("unit")?,
    })
}

pub(crate) fn row_to_stats(row: &PgRow) -> Result<AggregateStats, StorageError> {
    let count: i64 = row.try_get("count")?;
    let non_null_count: i64 = row.try_get("non_null_count")?;
    Ok(AggregateStats::new(
        u64::try_from(count).unwrap_or(0),
        u64::try_from(non_null_count).unwrap_or(0),
        row.try_get("min")?,
        row.try_get("max")?,
        row.try_get("mean")?,
    ))
}

/// Append ` WHERE ...` for the fields `filter` sets.
///
/// `disease`/`indicator` compare `left(col, N)` first so the planner can use
/// the prefix index, then compare exactly.
pub(crate) fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, filter: &ObservationFilter) {
    let mut sep = " WHERE ";
    for (column, value) in [("disease", &filter.disease), ("indicator", &filter.indicator)] {
        if let Some(v) = value {
            qb.push(sep)
                .push(OBSERVATION_INDEX.prefix_expr(Dialect::Postgres, column))
                .push(" = left(")
                .push_bind(v.clone())
                .push(format!(", {}) AND {column} = ", OBSERVATION_INDEX.prefix_len))
                .push_bind(v.clone());
            sep = " AND ";
        }
    }
    if let Some(year) = filter.year {
        qb.push(sep).push("year = ").push_bind(year);
        sep = " AND ";
    }
    if let Some(region) = &filter.region {
        qb.push(sep).push("region = ").push_bind(region.clone());
    }
}
