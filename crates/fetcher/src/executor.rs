//! Running endpoints as action executors.

use std::collections::BTreeMap;
use std::sync::Arc;

use actions::{BoxError, Executor};
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{Endpoint, Error, Fetcher, HttpClient, ReqwestClient};

/// An [`Executor`] that calls one endpoint through a shared fetcher.
///
/// Parameters must be a JSON object (or null, meaning none). Fetch errors
/// are returned to the caller as the executor's error.
pub struct EndpointExecutor<H = ReqwestClient> {
    fetcher: Arc<Fetcher<H>>,
    endpoint: Endpoint,
    headers: Option<BTreeMap<String, String>>,
}

impl<H: HttpClient> EndpointExecutor<H> {
    pub fn new(fetcher: Arc<Fetcher<H>>, endpoint: Endpoint) -> Self {
        Self {
            fetcher,
            endpoint,
            headers: None,
        }
    }

    /// Send these headers instead of the default `Content-Type`.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl<H: HttpClient + 'static> Executor<Value, Value> for EndpointExecutor<H> {
    async fn execute(&self, params: Value) -> Result<Value, BoxError> {
        let params = match params {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::InvalidParams(format!("expected an object, got {other}")).into());
            }
        };

        let data = self
            .fetcher
            .fetch(&self.endpoint, &params, self.headers.as_ref())
            .await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HttpRequest, HttpResponse, Parameter, Result};
    use actions::{Action, ActionManager, PolicySpec};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        urls: Mutex<Vec<String>>,
    }

    impl HttpClient for Recorder {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.urls.lock().unwrap().push(request.url);
            Ok(HttpResponse::ok(json!({ "status": 200, "message": "deleted" })))
        }
    }

    struct Owner(bool);

    fn delete_endpoint() -> Endpoint {
        Endpoint::new("delete-article", "DELETE", "/articles/:id")
            .with_parameter(Parameter::path("id").required())
    }

    fn manager(fetcher: &Arc<Fetcher<Recorder>>, owner: bool) -> ActionManager<Owner> {
        let is_owner = policy_owner();
        let mut manager = ActionManager::new(Owner(owner));
        manager.add_action(
            Action::new("delete-article", PolicySpec::single(is_owner)).with_executor(Arc::new(
                EndpointExecutor::new(fetcher.clone(), delete_endpoint()),
            )),
        );
        manager
    }

    fn policy_owner() -> actions::PolicyRef<Owner> {
        struct IsOwner;

        #[async_trait]
        impl actions::Policy<Owner> for IsOwner {
            async fn test(&self, ctx: &Owner) -> std::result::Result<bool, BoxError> {
                Ok(ctx.0)
            }
        }

        Arc::new(IsOwner)
    }

    #[tokio::test]
    async fn authorized_action_calls_endpoint() {
        let fetcher = Arc::new(Fetcher::new(Recorder::default()).with_base_url("http://api.test"));
        let manager = manager(&fetcher, true);

        let result = manager
            .execute("delete-article", json!({ "id": "456" }))
            .await
            .unwrap();

        assert_eq!(result, json!({ "status": 200, "message": "deleted" }));
        assert_eq!(
            *fetcher.client().urls.lock().unwrap(),
            ["http://api.test/articles/456"]
        );
    }

    #[tokio::test]
    async fn denied_action_never_reaches_transport() {
        let fetcher = Arc::new(Fetcher::new(Recorder::default()));
        let manager = manager(&fetcher, false);

        assert!(manager.execute("delete-article", json!({ "id": "456" })).await.is_err());
        assert!(fetcher.client().urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn fetch_error_surfaces_as_executor_error() {
        let fetcher = Arc::new(Fetcher::new(Recorder::default()));
        let manager = manager(&fetcher, true);

        let err = manager.execute("delete-article", json!({})).await.unwrap_err();
        let source = err.into_executor_error().unwrap();
        assert!(matches!(
            source.downcast_ref::<Error>(),
            Some(Error::MissingParameter(name)) if name == "id"
        ));
    }

    #[tokio::test]
    async fn non_object_params_are_rejected() {
        let fetcher = Arc::new(Fetcher::new(Recorder::default()));
        let executor = EndpointExecutor::new(fetcher, delete_endpoint());

        let err = executor.execute(json!([1, 2])).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid parameters: expected an object, got [1,2]");
    }
}
