//! The composite (disease, indicator, year) lookup index.
//!
//! String columns are indexed on a bounded prefix so entries stay small.
//! Lookups pair the prefix predicate (which the planner matches against the
//! index expression) with an exact equality, so the index only ever prunes
//! candidates and never decides membership.

use healthstat_core::{INDEX_PREFIX_LEN, OBSERVATIONS_TABLE, OBSERVATION_INDEX_NAME};
use serde::Serialize;

/// Outcome of an `ensure_index` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStatus {
    /// The index did not exist and was created.
    Created,
    /// The index already existed; nothing was done.
    AlreadyPresent,
}

/// SQL flavour for index and predicate rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

/// Declaration of a bounded-prefix composite index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDefinition {
    pub name: &'static str,
    pub table: &'static str,
    /// String columns indexed on their first `prefix_len` characters.
    pub prefix_columns: &'static [&'static str],
    /// Columns indexed whole, after the prefix columns.
    pub full_columns: &'static [&'static str],
    pub prefix_len: u32,
}

/// The index every filtered lookup relies on.
pub const OBSERVATION_INDEX: IndexDefinition = IndexDefinition {
    name: OBSERVATION_INDEX_NAME,
    table: OBSERVATIONS_TABLE,
    prefix_columns: &["disease", "indicator"],
    full_columns: &["year"],
    prefix_len: INDEX_PREFIX_LEN,
};

impl IndexDefinition {
    /// Expression indexing the bounded prefix of `operand`.
    #[must_use]
    pub fn prefix_expr(&self, dialect: Dialect, operand: &str) -> String {
        match dialect {
            Dialect::Sqlite => format!("substr({operand}, 1, {})", self.prefix_len),
            Dialect::Postgres => format!("left({operand}, {})", self.prefix_len),
        }
    }

    /// `CREATE INDEX IF NOT EXISTS` statement for `dialect`.
    #[must_use]
    pub fn create_sql(&self, dialect: Dialect) -> String {
        let keys: Vec<String> = self
            .prefix_columns
            .iter()
            .map(|col| self.prefix_expr(dialect, col))
            .chain(self.full_columns.iter().map(|col| (*col).to_owned()))
            .collect();
        format!("CREATE INDEX IF NOT EXISTS {} ON {} ({})", self.name, self.table, keys.join(", "))
    }

    /// Equality predicate on a prefix column against the bind placeholder
    /// `param`: the prefix half is index-matchable, the exact half decides.
    #[must_use]
    pub fn prefix_equality(&self, dialect: Dialect, column: &str, param: &str) -> String {
        format!(
            "{} = {} AND {column} = {param}",
            self.prefix_expr(dialect, column),
            self.prefix_expr(dialect, param)
        )
    }
}
