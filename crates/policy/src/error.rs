//! Policy error types.

use thiserror::Error;

/// Boxed error returned by policy tests and action executors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single policy test.
///
/// The evaluator never surfaces these to callers; it logs them and counts
/// the failing leaf as a denial. [`check`](crate::check) returns them
/// directly for callers that want to inspect one policy.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The policy test returned an error.
    #[error("policy {policy} failed: {source}")]
    Failed {
        policy: String,
        #[source]
        source: BoxError,
    },

    /// The policy test panicked.
    #[error("policy {policy} panicked: {message}")]
    Panicked { policy: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
