//! The policy trait and closure-backed policies.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::BoxError;

/// Data that policies are evaluated against.
///
/// The core places no schema on a context; any type that can be shared
/// across concurrently running policy tests qualifies.
pub trait Context: Send + Sync {}

impl<T: Send + Sync + ?Sized> Context for T {}

/// An asynchronous authorization predicate over a context.
///
/// Implementations may perform I/O. An `Err` (or a panic) is treated by the
/// evaluator as a denial of this one leaf.
#[async_trait]
pub trait Policy<C>: Send + Sync {
    /// Test the context.
    async fn test(&self, ctx: &C) -> Result<bool, BoxError>;

    /// Name used when reporting failures.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a policy. One policy may guard many actions.
pub type PolicyRef<C> = Arc<dyn Policy<C>>;

/// A policy backed by a synchronous closure.
pub struct FnPolicy<F> {
    name: Cow<'static, str>,
    test: F,
}

impl<F> FnPolicy<F> {
    pub fn new(name: impl Into<Cow<'static, str>>, test: F) -> Self {
        Self {
            name: name.into(),
            test,
        }
    }
}

impl<F> fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<C, F> Policy<C> for FnPolicy<F>
where
    C: Context,
    F: Fn(&C) -> Result<bool, BoxError> + Send + Sync,
{
    async fn test(&self, ctx: &C) -> Result<bool, BoxError> {
        (self.test)(ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Build a policy from an infallible predicate.
pub fn from_fn<C, F>(name: impl Into<Cow<'static, str>>, test: F) -> PolicyRef<C>
where
    C: Context + 'static,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    try_from_fn(name, infallible(test))
}

fn infallible<C, F>(test: F) -> impl Fn(&C) -> Result<bool, BoxError> + Send + Sync + 'static
where
    C: 'static,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    move |ctx: &C| -> Result<bool, BoxError> { Ok(test(ctx)) }
}

/// Build a policy from a predicate that may fail.
pub fn try_from_fn<C, F>(name: impl Into<Cow<'static, str>>, test: F) -> PolicyRef<C>
where
    C: Context,
    F: Fn(&C) -> Result<bool, BoxError> + Send + Sync + 'static,
{
    Arc::new(FnPolicy::new(name, test))
}
