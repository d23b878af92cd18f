//! Article policies and actions.

use std::sync::Arc;

use actions::{Action, BoxError, Clause, PolicyRef, PolicySpec};
use fetcher::{Endpoint, EndpointExecutor, Fetcher, Parameter};
use serde_json::{Value, json};

use crate::config::ArticleContext;

pub fn is_admin() -> PolicyRef<ArticleContext> {
    policy::from_fn("is_admin", |ctx: &ArticleContext| ctx.user.has_role("admin"))
}

pub fn is_editor() -> PolicyRef<ArticleContext> {
    policy::from_fn("is_editor", |ctx: &ArticleContext| {
        ctx.user.has_role("editor")
    })
}

pub fn is_owner() -> PolicyRef<ArticleContext> {
    policy::from_fn("is_owner", |ctx: &ArticleContext| {
        ctx.user.id == ctx.article.author_id
    })
}

/// The remote endpoint behind `delete-article`.
pub fn delete_endpoint() -> Endpoint {
    Endpoint::new("delete-article", "DELETE", "/articles/:id")
        .with_name("Delete Article")
        .with_parameter(
            Parameter::path("id")
                .required()
                .with_description("Article to delete"),
        )
}

/// Build the article actions.
///
/// With a fetcher, deletion goes to the remote API; otherwise it is only
/// acknowledged locally.
pub fn actions(fetcher: Option<Arc<Fetcher>>) -> Vec<Action<ArticleContext>> {
    let owner = is_owner();

    let view = Action::unrestricted("view-article")
        .with_name("View Article")
        .with_executor_fn(|params: Value| async move { acknowledge("viewed", params) });

    let edit = Action::new(
        "edit-article",
        PolicySpec::all_of([Clause::any_of([is_admin(), is_editor(), owner.clone()])]),
    )
    .with_name("Edit Article")
    .with_executor_fn(|params: Value| async move {
        let mut result = acknowledge("edited", params.clone())?;
        for field in ["title", "content"] {
            if let Some(value) = params.get(field) {
                result[field] = value.clone();
            }
        }
        Ok::<_, BoxError>(result)
    });

    let delete = Action::new("delete-article", owner).with_name("Delete Article");
    let delete = match fetcher {
        Some(fetcher) => {
            delete.with_executor(Arc::new(EndpointExecutor::new(fetcher, delete_endpoint())))
        }
        None => {
            delete.with_executor_fn(|params: Value| async move { acknowledge("deleted", params) })
        }
    };

    vec![view, edit, delete]
}

fn acknowledge(status: &str, params: Value) -> Result<Value, BoxError> {
    let id = params
        .get("id")
        .and_then(Value::as_str)
        .ok_or("missing article id")?;
    Ok(json!({ "id": id, "status": status }))
}
