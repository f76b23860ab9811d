//! Raw dataset rows and their conversion into typed observations.
//!
//! This is the only place loosely-typed column maps exist; everything past
//! [`Observation::from_raw`] works on [`Observation`].

use std::collections::HashMap;

use super::Observation;
use crate::error::RowRejection;

/// Columns a row must carry to become an observation.
pub const REQUIRED_COLUMNS: [&str; 3] = ["disease", "indicator", "year"];

/// Canonical column names understood by the loader.
pub const KNOWN_COLUMNS: [&str; 6] = ["disease", "indicator", "year", "value", "region", "unit"];

/// Normalize a source header to its canonical column name.
///
/// Headers are trimmed, lower-cased and have inner whitespace replaced by
/// `_`. French source headers map onto the canonical names. Unknown headers
/// come back normalized but otherwise untouched.
#[must_use]
pub fn canonical_column(header: &str) -> String {
    let normalized = header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    let canonical = match normalized.as_str() {
        "maladie" => "disease",
        "indicateur" => "indicator",
        "annee" | "année" => "year",
        "valeur" => "value",
        "région" | "departement" | "département" => "region",
        "unite" | "unité" => "unit",
        _ => return normalized,
    };
    canonical.to_owned()
}

/// Unit implied by an indicator when the source carries no unit column.
#[must_use]
pub fn default_unit_for(indicator: &str) -> Option<&'static str> {
    match indicator.trim().to_lowercase().as_str() {
        "prevalence" | "prévalence" => Some("%"),
        "incidence" | "mortalite" | "mortalité" => Some("pour 100 000 hab"),
        _ => None,
    }
}

/// One row of the source dataset, keyed by canonical column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(header, value)` pairs; headers go through [`canonical_column`].
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (k, v) in pairs {
            row.insert(k.as_ref(), v);
        }
        row
    }

    pub fn insert(&mut self, header: &str, value: impl Into<String>) {
        self.fields.insert(canonical_column(header), value.into());
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Whether the column exists at all, blank or not.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    fn non_blank(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    fn required(&self, column: &'static str) -> Result<&str, RowRejection> {
        self.non_blank(column).ok_or(RowRejection::MissingField(column))
    }
}

/// Parse a year, accepting integral float text such as `"2018.0"`.
pub fn parse_year(raw: &str) -> Result<i32, RowRejection> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Ok(year);
    }
    match trimmed.parse::<f64>() {
        Ok(f)
            if f.is_finite()
                && f.fract() == 0.0
                && f >= f64::from(i32::MIN)
                && f <= f64::from(i32::MAX) =>
        {
            Ok(f as i32)
        },
        _ => Err(RowRejection::InvalidYear(trimmed.to_owned())),
    }
}

/// Parse a measured value; blank or unparseable text becomes `None`.
#[must_use]
pub fn parse_value(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

impl Observation {
    /// Validate a raw row.
    ///
    /// `disease`, `indicator` and `year` must be present and non-blank and
    /// `year` must be an integer. A malformed `value` does not reject the
    /// row; it is recorded as `None`.
    pub fn from_raw(row: &RawRow) -> Result<Self, RowRejection> {
        let disease = row.required("disease")?;
        let indicator = row.required("indicator")?;
        let year = parse_year(row.required("year")?)?;

        let unit = if row.has_column("unit") {
            row.non_blank("unit").map(ToOwned::to_owned)
        } else {
            default_unit_for(indicator).map(ToOwned::to_owned)
        };

        Ok(Self {
            disease: disease.to_owned(),
            indicator: indicator.to_owned(),
            year,
            value: parse_value(row.get("value")),
            region: row.non_blank("region").map(ToOwned::to_owned),
            unit,
        })
    }
}
