//! Request query types (Deserialize)
//!
//! Parameters keep the French names of the original dataset as aliases.

use healthstat_core::{DEFAULT_QUERY_LIMIT, MAX_QUERY_LIMIT};
use serde::Deserialize;

use crate::api_error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ObservationsQuery {
    #[serde(alias = "maladie")]
    pub disease: Option<String>,
    #[serde(alias = "indicateur")]
    pub indicator: Option<String>,
    /// Kept as text so a malformed year is reported by the query service.
    #[serde(alias = "annee")]
    pub year: Option<String>,
    pub region: Option<String>,
    /// Kept as text so a malformed limit gets the JSON error body.
    pub limit: Option<String>,
}

impl ObservationsQuery {
    /// Parsed limit, defaulted when absent or blank and capped to prevent
    /// unbounded responses.
    pub fn capped_limit(&self) -> Result<usize, ApiError> {
        let Some(raw) = self.limit.as_deref().map(str::trim).filter(|l| !l.is_empty()) else {
            return Ok(DEFAULT_QUERY_LIMIT);
        };
        raw.parse::<usize>().map(|l| l.min(MAX_QUERY_LIMIT)).map_err(|_| {
            ApiError::BadRequest(format!("invalid limit `{raw}`: expected a non-negative integer"))
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(alias = "maladie")]
    pub disease: Option<String>,
    #[serde(alias = "indicateur")]
    pub indicator: Option<String>,
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "test code")]

    use super::*;

    fn with_limit(limit: Option<&str>) -> ObservationsQuery {
        ObservationsQuery {
            disease: None,
            indicator: None,
            year: None,
            region: None,
            limit: limit.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn limit_defaults_when_absent_or_blank() {
        assert_eq!(with_limit(None).capped_limit().unwrap(), DEFAULT_QUERY_LIMIT);
        assert_eq!(with_limit(Some(" ")).capped_limit().unwrap(), DEFAULT_QUERY_LIMIT);
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(with_limit(Some("5")).capped_limit().unwrap(), 5);
        assert_eq!(with_limit(Some("1000000")).capped_limit().unwrap(), MAX_QUERY_LIMIT);
    }

    #[test]
    fn malformed_limit_is_bad_request() {
        assert!(matches!(with_limit(Some("abc")).capped_limit(), Err(ApiError::BadRequest(_))));
        assert!(matches!(with_limit(Some("-1")).capped_limit(), Err(ApiError::BadRequest(_))));
    }
}
