use healthstat_core::{Observation, ObservationFilter};
use rusqlite::{params, params_from_iter};

use super::predicate::Predicate;
use super::{Storage, get_conn, row_error};
use crate::error::StorageError;

const SELECT_COLUMNS: &str = "SELECT disease, indicator, year, value, region, unit FROM observations";

impl Storage {
    pub(crate) fn row_to_observation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Observation> {
        Ok(Observation {
            disease: row.get(0)?,
            indicator: row.get(1)?,
            year: row.get(2)?,
            value: row.get(3)?,
            region: row.get(4)?,
            unit: row.get(5)?,
        })
    }

    /// Insert a batch inside one transaction.
    ///
    /// # Errors
    /// Returns error if the connection or any insert fails; nothing from the
    /// batch is kept in that case.
    pub fn insert_batch(&self, rows: &[Observation]) -> Result<usize, StorageError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO observations (disease, indicator, year, value, region, unit)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for obs in rows {
                inserted += stmt.execute(params![
                    obs.disease,
                    obs.indicator,
                    obs.year,
                    obs.value,
                    obs.region,
                    obs.unit
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Observations matching `filter`, newest year first.
    ///
    /// # Errors
    /// Returns error if database query fails, or `DataCorruption` if a
    /// stored row cannot be decoded.
    pub fn select(
        &self,
        filter: &ObservationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<Observation>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut predicate = Predicate::from_filter(filter);
        let limit_sql = limit.map(|l| predicate.push_limit(l)).unwrap_or_default();
        let sql = format!("{SELECT_COLUMNS}{} ORDER BY year DESC, id{limit_sql}", predicate.sql);

        let mut stmt = conn.prepare(&sql)?;
        let rows =
            stmt.query_map(params_from_iter(predicate.params.iter()), Self::row_to_observation)?;
        rows.map(|row| row.map_err(row_error)).collect()
    }

    /// Delete every observation.
    ///
    /// # Errors
    /// Returns error if the delete fails.
    pub fn clear(&self) -> Result<usize, StorageError> {
        let conn = get_conn(&self.pool)?;
        let removed = conn.execute("DELETE FROM observations", [])?;
        tracing::info!(removed, "Cleared observations table");
        Ok(removed)
    }

    /// `EXPLAIN QUERY PLAN` detail lines for the lookup `select` would run.
    #[cfg(test)]
    pub(crate) fn query_plan(&self, filter: &ObservationFilter) -> Vec<String> {
        let conn = get_conn(&self.pool).unwrap();
        let predicate = Predicate::from_filter(filter);
        let sql = format!("EXPLAIN QUERY PLAN {SELECT_COLUMNS}{}", predicate.sql);
        let mut stmt = conn.prepare(&sql).unwrap();
        stmt.query_map(params_from_iter(predicate.params.iter()), |row| row.get::<_, String>(3))
            .unwrap()
            .map(Result::unwrap)
            .collect()
    }
}
