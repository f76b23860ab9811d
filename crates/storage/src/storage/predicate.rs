//! WHERE-clause rendering for SQLite lookups.

use healthstat_core::ObservationFilter;
use rusqlite::types::Value;

use crate::index::{Dialect, OBSERVATION_INDEX};

/// Rendered predicate plus its positional parameters (`?1`, `?2`, ...).
#[derive(Debug, Default)]
pub(crate) struct Predicate {
    pub(crate) sql: String,
    pub(crate) params: Vec<Value>,
}

impl Predicate {
    /// Render only the fields the filter sets.
    ///
    /// `disease` and `indicator` go through the index prefix expression
    /// first, then `year` and `region` are checked exactly.
    pub(crate) fn from_filter(filter: &ObservationFilter) -> Self {
        let mut clauses: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        for (column, value) in [("disease", &filter.disease), ("indicator", &filter.indicator)] {
            if let Some(v) = value {
                params.push(Value::Text(v.clone()));
                let placeholder = format!("?{}", params.len());
                clauses.push(OBSERVATION_INDEX.prefix_equality(
                    Dialect::Sqlite,
                    column,
                    &placeholder,
                ));
            }
        }
        if let Some(year) = filter.year {
            params.push(Value::Integer(i64::from(year)));
            clauses.push(format!("year = ?{}", params.len()));
        }
        if let Some(region) = &filter.region {
            params.push(Value::Text(region.clone()));
            clauses.push(format!("region = ?{}", params.len()));
        }

        let sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        Self { sql, params }
    }

    /// Append a trailing `LIMIT` parameter.
    pub(crate) fn push_limit(&mut self, limit: usize) -> String {
        self.params.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        format!(" LIMIT ?{}", self.params.len())
    }
}
