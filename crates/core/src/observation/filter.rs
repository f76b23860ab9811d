use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Any subset of `{disease, indicator, year}` (plus `region`); empty selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationFilter {
    pub disease: Option<String>,
    pub indicator: Option<String>,
    pub year: Option<i32>,
    pub region: Option<String>,
}

impl ObservationFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on exactly one (disease, indicator) pair, all years.
    #[must_use]
    pub fn pair(disease: impl Into<String>, indicator: impl Into<String>) -> Self {
        Self::new().disease(disease).indicator(indicator)
    }

    /// Build from loosely-typed request parameters.
    ///
    /// Blank values count as absent. A non-blank `year` that is not an
    /// integer is rejected.
    pub fn from_params(
        disease: Option<&str>,
        indicator: Option<&str>,
        year: Option<&str>,
        region: Option<&str>,
    ) -> Result<Self, FilterError> {
        let year = match non_blank(year) {
            Some(y) => Some(y.parse::<i32>().map_err(|_| FilterError::InvalidYear(y.to_owned()))?),
            None => None,
        };
        Ok(Self {
            disease: non_blank(disease).map(ToOwned::to_owned),
            indicator: non_blank(indicator).map(ToOwned::to_owned),
            year,
            region: non_blank(region).map(ToOwned::to_owned),
        })
    }

    #[must_use]
    pub fn disease(mut self, disease: impl Into<String>) -> Self {
        self.disease = Some(disease.into());
        self
    }

    #[must_use]
    pub fn indicator(mut self, indicator: impl Into<String>) -> Self {
        self.indicator = Some(indicator.into());
        self
    }

    #[must_use]
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// No field set: the lookup returns the whole dataset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disease.is_none()
            && self.indicator.is_none()
            && self.year.is_none()
            && self.region.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
