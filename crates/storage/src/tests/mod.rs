//! Test utilities and module declarations for storage tests.

use crate::Storage;
use healthstat_core::Observation;
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn create_test_observation(disease: &str, indicator: &str, year: i32, value: Option<f64>) -> Observation {
    Observation::new(disease, indicator, year).with_value(value)
}

/// A small mixed dataset: two diseases, two indicators, several years,
/// one null value and one duplicate row.
pub fn sample_rows() -> Vec<Observation> {
    vec![
        create_test_observation("cancer", "prevalence", 2018, Some(1.0)),
        create_test_observation("cancer", "prevalence", 2019, Some(2.0)),
        create_test_observation("cancer", "prevalence", 2019, None),
        create_test_observation("cancer", "prevalence", 2020, Some(3.0)).with_region("Bretagne"),
        create_test_observation("cancer", "incidence", 2018, Some(40.0)),
        create_test_observation("diabete", "prevalence", 2018, Some(5.5)),
        create_test_observation("diabete", "prevalence", 2018, Some(5.5)),
    ]
}
