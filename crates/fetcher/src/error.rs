//! Fetcher error types.

use actions::BoxError;
use thiserror::Error;

/// Fetcher errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A required parameter with no default was not supplied.
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    /// The parameters were not a JSON object.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// The request could not be built (bad method or URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The transport failed before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The configured mapper key is absent from the response.
    #[error("mapper key not found: {0}")]
    MapperKeyNotFound(String),

    /// The mapper function rejected the response.
    #[error("response mapping failed: {0}")]
    Mapper(#[source] BoxError),

    /// Failed to parse fetcher configuration.
    #[error("failed to parse config: {0}")]
    Config(String),

    /// Failed to read fetcher configuration.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
