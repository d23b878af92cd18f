//! Action definitions.

use std::fmt;
use std::future::Future;

use policy::{BoxError, PolicySpec};
use serde_json::Value;

use crate::executor::{ExecutorRef, executor_fn};

/// An identified operation guarded by a policy spec.
///
/// Identity is by `id` only. The registry does not enforce uniqueness.
pub struct Action<C, P = Value, R = Value> {
    pub id: String,
    pub name: Option<String>,
    pub policy: PolicySpec<C>,
    pub executor: Option<ExecutorRef<P, R>>,
}

impl<C, P, R> Action<C, P, R> {
    /// Create an action. The policy is normalised here, once.
    pub fn new(id: impl Into<String>, policy: impl Into<PolicySpec<C>>) -> Self {
        Self {
            id: id.into(),
            name: None,
            policy: policy.into(),
            executor: None,
        }
    }

    /// Create an action with no restriction.
    pub fn unrestricted(id: impl Into<String>) -> Self {
        Self::new(id, PolicySpec::Always)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_executor(mut self, executor: ExecutorRef<P, R>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn with_executor_fn<F, Fut>(self, f: F) -> Self
    where
        P: Send + 'static,
        R: Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, BoxError>> + Send + 'static,
    {
        self.with_executor(executor_fn(f))
    }

    /// Display label, falling back to the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl<C, P, R> Clone for Action<C, P, R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            policy: self.policy.clone(),
            executor: self.executor.clone(),
        }
    }
}

impl<C, P, R> fmt::Debug for Action<C, P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("executor", &self.executor.is_some())
            .finish()
    }
}
