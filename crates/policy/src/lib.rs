//! Policy composition and evaluation.
//!
//! A [`Policy`] is an asynchronous predicate over a caller-defined context.
//! Policies are attached to operations through a [`PolicySpec`], which is
//! either unrestricted, a single policy, or a conjunction whose clauses may
//! themselves be OR-groups.
//!
//! [`evaluate`] turns a spec and a context into one boolean decision. Every
//! leaf in the spec runs exactly once per decision, concurrently with its
//! siblings, and a leaf that errors or panics counts as a denial without
//! affecting any other leaf.
//!
//! # Example
//!
//! ```
//! use policy::{Clause, PolicySpec};
//!
//! struct User {
//!     roles: Vec<&'static str>,
//! }
//!
//! let admin = policy::from_fn("admin", |u: &User| u.roles.contains(&"admin"));
//! let editor = policy::from_fn("editor", |u: &User| u.roles.contains(&"editor"));
//!
//! let spec = PolicySpec::all_of([Clause::any_of([admin, editor])]);
//!
//! # futures::executor::block_on(async {
//! let user = User { roles: vec!["editor"] };
//! assert!(policy::evaluate(&spec, &user).await);
//! # });
//! ```

mod error;
mod evaluate;
mod policy;
mod spec;

pub use error::{BoxError, Error, Result};
pub use evaluate::{check, evaluate, evaluate_clause};
pub use policy::{Context, FnPolicy, Policy, PolicyRef, from_fn, try_from_fn};
pub use spec::{Clause, PolicySpec};
