//! Error types for the chart engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the chart engine
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to initialize the engine
    #[error("Engine initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load a dataset or host source
    #[error("Failed to load source: {0}")]
    LoadError(String),

    /// A dataset row failed to parse or validate (1-based data row)
    #[error("Dataset row {row}: {message}")]
    DatasetError { row: usize, message: String },

    /// The host document is missing a collaborator element or is unparseable
    #[error("Host document error: {0}")]
    HostError(String),

    /// Failed to render content
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Operation timed out
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
