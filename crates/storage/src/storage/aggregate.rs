use healthstat_core::{AggregateStats, ObservationFilter, YearStats};
use rusqlite::params_from_iter;

use super::predicate::Predicate;
use super::{Storage, get_conn, row_error};
use crate::error::StorageError;

fn stats_from_columns(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<AggregateStats> {
    let count: i64 = row.get(offset)?;
    let non_null: i64 = row.get(offset + 1)?;
    Ok(AggregateStats::new(
        count as u64,
        non_null as u64,
        row.get(offset + 2)?,
        row.get(offset + 3)?,
        row.get(offset + 4)?,
    ))
}

impl Storage {
    /// Aggregate `value` over the rows matching `filter`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn aggregate(&self, filter: &ObservationFilter) -> Result<AggregateStats, StorageError> {
        let conn = get_conn(&self.pool)?;
        let predicate = Predicate::from_filter(filter);
        let sql = format!(
            "SELECT COUNT(*), COUNT(value), MIN(value), MAX(value), AVG(value)
             FROM observations{}",
            predicate.sql
        );
        conn.query_row(&sql, params_from_iter(predicate.params.iter()), |row| {
            stats_from_columns(row, 0)
        })
        .map_err(row_error)
    }

    /// Aggregate `value` per year over the rows matching `filter`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn aggregate_by_year(
        &self,
        filter: &ObservationFilter,
    ) -> Result<Vec<YearStats>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let predicate = Predicate::from_filter(filter);
        let sql = format!(
            "SELECT year, COUNT(*), COUNT(value), MIN(value), MAX(value), AVG(value)
             FROM observations{} GROUP BY year ORDER BY year",
            predicate.sql
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(predicate.params.iter()), |row| {
            Ok(YearStats { year: row.get(0)?, stats: stats_from_columns(row, 1)? })
        })?;
        rows.map(|row| row.map_err(row_error)).collect()
    }
}
