//! Aggregate records returned by the statistics path.

use serde::{Deserialize, Serialize};

/// Summary over a selected subset of observations.
///
/// `min`, `max` and `mean` are `None` ("undefined") whenever no matching row
/// has a value, which keeps "no data" distinct from a genuine zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// All matching rows, null values included.
    pub count: u64,
    /// Matching rows with a non-null value.
    pub non_null_count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl AggregateStats {
    #[must_use]
    pub fn new(
        count: u64,
        non_null_count: u64,
        min: Option<f64>,
        max: Option<f64>,
        mean: Option<f64>,
    ) -> Self {
        if non_null_count == 0 {
            return Self { count, non_null_count, min: None, max: None, mean: None };
        }
        Self { count, non_null_count, min, max, mean }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// [`AggregateStats`] for one year of a (disease, indicator) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearStats {
    pub year: i32,
    #[serde(flatten)]
    pub stats: AggregateStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_values_means_undefined_not_zero() {
        let stats = AggregateStats::new(3, 0, Some(0.0), Some(0.0), Some(0.0));
        assert_eq!(stats.min, None);
        assert_eq!(stats.max, None);
        assert_eq!(stats.mean, None);
        assert!(!stats.is_empty());
    }

    #[test]
    fn serializes_camel_case_with_nulls() {
        let json = serde_json::to_value(AggregateStats::new(2, 0, None, None, None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"count": 2, "nonNullCount": 0, "min": null, "max": null, "mean": null})
        );
    }

    #[test]
    fn year_stats_flatten() {
        let row = YearStats { year: 2018, stats: AggregateStats::new(1, 1, Some(0.0), Some(0.0), Some(0.0)) };
        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json["year"], 2018);
        assert_eq!(json["mean"], 0.0);
        assert_eq!(json["nonNullCount"], 1);
    }
}
