//! Action executors.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use policy::BoxError;

/// Performs an action's work once it has been authorized.
///
/// This is the boundary between policy checks and side effects. The
/// manager calls it exactly once per authorized `execute`, with no retry
/// or timeout of its own.
#[async_trait]
pub trait Executor<P, R>: Send + Sync {
    /// Run the action with the caller's parameters.
    async fn execute(&self, params: P) -> Result<R, BoxError>;
}

/// Shared handle to an executor.
pub type ExecutorRef<P, R> = Arc<dyn Executor<P, R>>;

/// An executor backed by an async closure.
pub struct FnExecutor<F>(F);

impl<F> FnExecutor<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> fmt::Debug for FnExecutor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnExecutor")
    }
}

#[async_trait]
impl<P, R, F, Fut> Executor<P, R> for FnExecutor<F>
where
    P: Send + 'static,
    R: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
{
    async fn execute(&self, params: P) -> Result<R, BoxError> {
        (self.0)(params).await
    }
}

/// Build a shared executor from an async closure.
pub fn executor_fn<P, R, F, Fut>(f: F) -> ExecutorRef<P, R>
where
    P: Send + 'static,
    R: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
{
    Arc::new(FnExecutor::new(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closure_executor_passes_params_through() {
        let double = executor_fn(|n: u32| async move { Ok::<_, BoxError>(n * 2) });
        assert_eq!(double.execute(21).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn closure_executor_returns_error() {
        let broken =
            executor_fn(|_: ()| async move { Err::<u32, BoxError>("upstream down".into()) });
        assert_eq!(broken.execute(()).await.unwrap_err().to_string(), "upstream down");
    }
}
