//! Error types for track loading, configuration and generation advancement.

use thiserror::Error;

/// Main error type for simulation operations.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// The track geometry is missing required fields or is degenerate.
    #[error("Malformed track: {0}")]
    MalformedTrack(String),

    /// Selection produced no gene-pool entries to breed from.
    #[error("Empty gene pool in generation {generation} ({archived} archived genomes)")]
    EmptyGenePool {
        /// Generation that failed to advance.
        generation: u32,
        /// Number of archive entries that were considered.
        archived: usize,
    },

    /// Configuration values are out of range.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

impl SimulationError {
    /// Creates a new malformed track error.
    #[must_use]
    pub fn malformed_track<S: Into<String>>(msg: S) -> Self {
        Self::MalformedTrack(msg.into())
    }

    /// Creates a new invalid parameters error.
    #[must_use]
    pub fn invalid_params<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParams(msg.into())
    }
}
