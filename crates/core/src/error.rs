use thiserror::Error;

/// Why a raw dataset row was not turned into an [`Observation`](crate::Observation).
///
/// Rejections are local to one row: the loader counts them as skipped and
/// keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    /// A required column is absent or blank.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// `year` is present but is not an integer.
    #[error("year {0:?} is not an integer")]
    InvalidYear(String),
}

/// Malformed query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("year {0:?} is not a valid integer")]
    InvalidYear(String),
}
