//! Fan-out/fan-in evaluation of policy specifications.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use futures::future::join_all;

use crate::{Clause, Context, Error, Policy, PolicySpec, Result};

/// Decide a spec against a context.
///
/// Never fails: a leaf that errors or panics is logged and counts as
/// `false`. Sibling leaves run concurrently and are all awaited before the
/// result is folded, so no leaf is skipped once another has denied.
pub async fn evaluate<C: Context>(spec: &PolicySpec<C>, ctx: &C) -> bool {
    let granted = match spec {
        PolicySpec::Always => true,
        PolicySpec::Single(policy) => settle(policy.as_ref(), ctx).await,
        PolicySpec::All(clauses) => join_all(clauses.iter().map(|c| evaluate_clause(c, ctx)))
            .await
            .into_iter()
            .all(|granted| granted),
    };
    tracing::debug!(spec = ?spec, leaves = spec.leaf_count(), granted, "policy decision");
    granted
}

/// Decide one clause of a conjunction.
pub async fn evaluate_clause<C: Context>(clause: &Clause<C>, ctx: &C) -> bool {
    match clause {
        Clause::Policy(policy) => settle(policy.as_ref(), ctx).await,
        Clause::AnyOf(group) => join_all(group.iter().map(|p| settle(p.as_ref(), ctx)))
            .await
            .into_iter()
            .any(|granted| granted),
    }
}

/// Run one policy test, turning a panic into an error.
pub async fn check<C: Context>(policy: &dyn Policy<C>, ctx: &C) -> Result<bool> {
    match AssertUnwindSafe(async { policy.test(ctx).await })
        .catch_unwind()
        .await
    {
        Ok(Ok(granted)) => Ok(granted),
        Ok(Err(source)) => Err(Error::Failed {
            policy: policy.name().to_string(),
            source,
        }),
        Err(payload) => Err(Error::Panicked {
            policy: policy.name().to_string(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

async fn settle<C: Context>(policy: &dyn Policy<C>, ctx: &C) -> bool {
    match check(policy, ctx).await {
        Ok(granted) => granted,
        Err(e) => {
            tracing::warn!(policy = policy.name(), error = %e, "policy test failed, denying");
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
