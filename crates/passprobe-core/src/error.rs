//! Error taxonomy shared across PassProbe crates.

use thiserror::Error;

pub type PassprobeResult<T> = Result<T, PassprobeError>;

#[derive(Debug, Error)]
pub enum PassprobeError {
    /// A request to the analysis service could not be sent or completed.
    #[error("network error: {0}")]
    Network(String),

    /// The analysis service answered with a non-success status or a body that
    /// could not be decoded.
    #[error("analysis service error: {0}")]
    Service(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("history store error: {0}")]
    History(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
