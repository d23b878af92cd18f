//! Action registry and policy-gated dispatch.

use futures::future::join_all;
use policy::Context;
use serde_json::Value;

use crate::{Action, Error, Result};

/// Owns a context and an ordered registry of actions.
///
/// Every decision is made against the context bound at the moment of the
/// call. Mutators take `&mut self`, so the context and registry cannot
/// change while a decision borrowed from the manager is in flight.
pub struct ActionManager<C, P = Value, R = Value> {
    context: C,
    actions: Vec<Action<C, P, R>>,
}

impl<C, P, R> ActionManager<C, P, R>
where
    C: Context,
    P: Send + 'static,
    R: Send + 'static,
{
    /// Create a manager bound to an initial context.
    pub fn new(context: C) -> Self {
        Self {
            context,
            actions: Vec::new(),
        }
    }

    /// Replace the bound context.
    pub fn set_context(&mut self, context: C) {
        self.context = context;
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Append an action. Duplicate ids are accepted.
    pub fn add_action(&mut self, action: Action<C, P, R>) {
        tracing::debug!(action = %action.id, "action registered");
        self.actions.push(action);
    }

    /// Replace the whole registry.
    pub fn set_actions(&mut self, actions: impl IntoIterator<Item = Action<C, P, R>>) {
        self.actions = actions.into_iter().collect();
        tracing::debug!(count = self.actions.len(), "action registry replaced");
    }

    /// Every registered action, authorized or not, in insertion order.
    pub fn actions(&self) -> &[Action<C, P, R>] {
        &self.actions
    }

    /// Actions the current context is authorized for, in insertion order.
    ///
    /// Runs every action's policies once per call.
    pub async fn get_actions(&self) -> Vec<&Action<C, P, R>> {
        let decisions = join_all(self.actions.iter().map(|action| self.authorize(action))).await;
        self.actions
            .iter()
            .zip(decisions)
            .filter_map(|(action, granted)| granted.then_some(action))
            .collect()
    }

    /// Whether the action exists and is authorized.
    ///
    /// An unknown id and a denial both yield `false`.
    pub async fn can_execute(&self, id: &str) -> bool {
        match self.find(id) {
            Some(action) => self.authorize(action).await,
            None => false,
        }
    }

    /// Authorize and run an action.
    ///
    /// The executor is invoked exactly once, only after the decision grants
    /// access. Its failure is returned as [`Error::Executor`] unchanged.
    pub async fn execute(&self, id: &str, params: P) -> Result<R> {
        let action = self.find(id).ok_or_else(|| {
            tracing::debug!(action = id, "execute rejected: not found");
            Error::NotFound(id.to_string())
        })?;

        if !self.authorize(action).await {
            tracing::debug!(action = id, "execute rejected: forbidden");
            return Err(Error::Forbidden(id.to_string()));
        }

        let executor = action
            .executor
            .as_ref()
            .ok_or_else(|| Error::NoExecutor(id.to_string()))?;

        tracing::debug!(action = id, "executing");
        executor.execute(params).await.map_err(Error::Executor)
    }

    /// First action with this id.
    fn find(&self, id: &str) -> Option<&Action<C, P, R>> {
        self.actions.iter().find(|action| action.id == id)
    }

    async fn authorize(&self, action: &Action<C, P, R>) -> bool {
        policy::evaluate(&action.policy, &self.context).await
    }
}
