use thiserror::Error;

/// Why a single source produced nothing this run.
///
/// Distinguishes an unreachable site from an unreadable payload from a
/// payload with no usable matches. Downstream treats all three as
/// skip-and-continue, but the run summary reports them differently.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unreachable: {0}")]
    Unreachable(String),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("no usable matches in source")]
    NoMatches,
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Unreachable(err.to_string())
    }
}

impl From<csv::Error> for SourceError {
    fn from(err: csv::Error) -> Self {
        SourceError::Malformed(err.to_string())
    }
}
