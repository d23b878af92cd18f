//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is unreadable or invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A `--param` value was not in `key=value` form.
    #[error("invalid parameter '{0}': expected key=value")]
    InvalidParam(String),

    /// `--param id` named an article other than the authorized one.
    #[error("article {requested} is not the authorized article {authorized}")]
    ArticleMismatch {
        requested: String,
        authorized: String,
    },

    /// Dispatch was refused or the executor failed.
    #[error(transparent)]
    Action(#[from] actions::Error),

    /// The HTTP transport could not be built.
    #[error(transparent)]
    Fetcher(#[from] fetcher::Error),

    /// The result could not be printed as JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
