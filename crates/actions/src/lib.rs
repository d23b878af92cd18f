//! Policy-gated actions.
//!
//! This crate registers named operations ("actions"), each guarded by a
//! [`PolicySpec`], and dispatches them only when the spec grants access
//! against the manager's current context.
//!
//! # Overview
//!
//! - **Action**: an id, an optional display name, a policy spec and an
//!   optional [`Executor`].
//! - **ActionManager**: owns the context and an ordered registry of actions;
//!   answers visibility ([`ActionManager::get_actions`]), authorization
//!   ([`ActionManager::can_execute`]) and gated invocation
//!   ([`ActionManager::execute`]).
//!
//! # Example
//!
//! ```
//! use actions::{Action, ActionManager};
//! use serde_json::{Value, json};
//!
//! struct Player {
//!     can_play: bool,
//! }
//!
//! # futures::executor::block_on(async {
//! let can_play = policy::from_fn("can_play", |p: &Player| p.can_play);
//!
//! let mut manager: ActionManager<Player> = ActionManager::new(Player { can_play: true });
//! manager.add_action(
//!     Action::new("play", can_play).with_executor_fn(|params: Value| async move {
//!         let song = params["song"].as_str().unwrap_or("nothing");
//!         Ok::<_, actions::BoxError>(json!(format!("Playing {song}")))
//!     }),
//! );
//!
//! assert!(manager.can_execute("play").await);
//! let result = manager.execute("play", json!({ "song": "Intro" })).await?;
//! assert_eq!(result, json!("Playing Intro"));
//! # Ok::<(), actions::Error>(())
//! # }).unwrap();
//! ```

mod action;
mod error;
mod executor;
mod manager;

pub use action::Action;
pub use error::{Error, Result};
pub use executor::{Executor, ExecutorRef, FnExecutor, executor_fn};
pub use manager::ActionManager;

pub use policy::{BoxError, Clause, Context, Policy, PolicyRef, PolicySpec};
