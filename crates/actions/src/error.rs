//! Dispatch error types.

use policy::BoxError;
use thiserror::Error;

/// Errors returned by [`ActionManager::execute`](crate::ActionManager::execute).
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No registered action has this id.
    #[error("action {0} not found")]
    NotFound(String),

    /// The action's policies denied access.
    #[error("action {0} not allowed")]
    Forbidden(String),

    /// The action was authorized but has nothing to run.
    #[error("action {0} has no executor")]
    NoExecutor(String),

    /// The executor failed. Display and source are the executor's own.
    #[error(transparent)]
    Executor(BoxError),
}

impl Error {
    /// The id of the action a dispatch error refers to.
    pub fn action_id(&self) -> Option<&str> {
        match self {
            Self::NotFound(id) | Self::Forbidden(id) | Self::NoExecutor(id) => Some(id),
            Self::Executor(_) => None,
        }
    }

    /// Recover the executor's error unchanged.
    pub fn into_executor_error(self) -> Option<BoxError> {
        match self {
            Self::Executor(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
