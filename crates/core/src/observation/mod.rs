//! The observation record and everything that produces or selects it.

mod filter;
mod raw;
#[cfg(test)]
mod raw_tests;

pub use filter::*;
pub use raw::*;

use serde::{Deserialize, Serialize};

/// One disease/indicator/year measurement.
///
/// `(disease, indicator, year)` is not unique: regional breakdowns share the
/// triple, and aggregation treats such rows as a multiset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub disease: String,
    pub indicator: String,
    pub year: i32,
    /// Measured quantity; `None` when the source value was blank or unparseable.
    pub value: Option<f64>,
    /// Descriptive only, never filtered on by the stats path.
    pub region: Option<String>,
    /// Descriptive only.
    pub unit: Option<String>,
}

impl Observation {
    #[must_use]
    pub fn new(disease: impl Into<String>, indicator: impl Into<String>, year: i32) -> Self {
        Self {
            disease: disease.into(),
            indicator: indicator.into(),
            year,
            value: None,
            region: None,
            unit: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: Option<f64>) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}
