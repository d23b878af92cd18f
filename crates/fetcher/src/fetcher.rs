//! Binding endpoints to requests and interpreting responses.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::{
    Endpoint, Error, FetcherConfig, HttpClient, HttpRequest, ReqwestClient, Result, Scope,
};

const BODY_PARAM: &str = "body";

/// Calls endpoints through an injected transport.
#[derive(Debug, Clone)]
pub struct Fetcher<H = ReqwestClient> {
    client: H,
    base_url: Option<String>,
    headers: BTreeMap<String, String>,
}

impl Fetcher<ReqwestClient> {
    /// Build a reqwest-backed fetcher from configuration.
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        let client = match config.timeout() {
            Some(timeout) => ReqwestClient::with_timeout(timeout)?,
            None => ReqwestClient::new(),
        };

        let mut fetcher = Self::new(client);
        fetcher.base_url = config.base_url.clone();
        fetcher.headers = config.headers.clone();
        Ok(fetcher)
    }
}

impl<H: HttpClient> Fetcher<H> {
    pub fn new(client: H) -> Self {
        Self {
            client,
            base_url: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn client(&self) -> &H {
        &self.client
    }

    /// Bind parameters to an endpoint without sending anything.
    ///
    /// `headers`, when given, replace the default `Content-Type` and are
    /// layered over the fetcher-wide headers.
    pub fn request(
        &self,
        endpoint: &Endpoint,
        params: &Map<String, Value>,
        headers: Option<&BTreeMap<String, String>>,
    ) -> Result<HttpRequest> {
        if let Some(missing) = endpoint
            .parameters
            .iter()
            .find(|p| p.is_mandatory() && lookup(params, &p.name).is_none())
        {
            return Err(Error::MissingParameter(missing.name.clone()));
        }

        let mut url = self.join_url(&bind_path(endpoint, params));
        let query = encode_query(endpoint, params);
        if !query.is_empty() {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }

        let mut all_headers = self.headers.clone();
        match headers {
            Some(headers) => all_headers.extend(headers.clone()),
            None => {
                all_headers.insert("Content-Type".to_string(), "application/json".to_string());
            }
        }

        Ok(HttpRequest {
            method: endpoint.method.clone(),
            url,
            headers: all_headers,
            body: bind_body(endpoint, params),
        })
    }

    /// Call an endpoint and return its (remapped) response body.
    pub async fn fetch(
        &self,
        endpoint: &Endpoint,
        params: &Map<String, Value>,
        headers: Option<&BTreeMap<String, String>>,
    ) -> Result<Value> {
        let request = self.request(endpoint, params, headers)?;
        tracing::debug!(
            endpoint = %endpoint.id,
            method = %request.method,
            url = %request.url,
            "fetching"
        );

        let response = self.client.send(request).await?;
        if !response.is_success() {
            return Err(Error::Api {
                status: response.status,
                message: response.error_message(),
            });
        }

        remap(endpoint, response.data)
    }

    fn join_url(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) if !path.starts_with("http://") && !path.starts_with("https://") => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    path.trim_start_matches('/')
                )
            }
            _ => path.to_string(),
        }
    }
}

/// A supplied, non-null parameter value.
fn lookup<'a>(params: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    params.get(name).filter(|v| !v.is_null())
}

fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Characters escaped in a substituted path value.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Replace `:name` placeholders with encoded parameter values or defaults.
///
/// A placeholder ends at the first character that cannot appear in a name,
/// so `/files/:id.json` binds `id`. Unknown or unbound placeholders are
/// left as written.
fn bind_path(endpoint: &Endpoint, params: &Map<String, Value>) -> String {
    let mut bound = String::with_capacity(endpoint.path.len());
    let mut rest = endpoint.path.as_str();

    while let Some(start) = rest.find(':') {
        bound.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let name = &after[..len];

        match path_value(endpoint, params, name) {
            Some(value) => bound.extend(utf8_percent_encode(&value, PATH_SEGMENT)),
            None => {
                bound.push(':');
                bound.push_str(name);
            }
        }
        rest = &after[len..];
    }

    bound.push_str(rest);
    bound
}

fn path_value(endpoint: &Endpoint, params: &Map<String, Value>, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    endpoint
        .parameters_in(Scope::Path)
        .find(|p| p.name == name)
        .and_then(|p| {
            lookup(params, &p.name)
                .map(to_text)
                .or_else(|| p.default.clone())
        })
}

/// Encode query-scoped parameters.
///
/// Arrays repeat the key; objects, and objects inside arrays, expand to
/// `name[key]=value`.
fn encode_query(endpoint: &Endpoint, params: &Map<String, Value>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    for parameter in endpoint.parameters_in(Scope::Query) {
        let name = parameter.name.as_str();
        match lookup(params, name) {
            Some(Value::Array(items)) => {
                for item in items {
                    match item {
                        Value::Object(object) => append_object(&mut query, name, object),
                        other => {
                            query.append_pair(name, &to_text(other));
                        }
                    }
                }
            }
            Some(Value::Object(object)) => append_object(&mut query, name, object),
            Some(value) => {
                query.append_pair(name, &to_text(value));
            }
            None => {}
        }
    }
    query.finish()
}

fn append_object(
    query: &mut form_urlencoded::Serializer<'_, String>,
    name: &str,
    object: &Map<String, Value>,
) {
    for (key, value) in object {
        query.append_pair(&format!("{name}[{key}]"), &to_text(value));
    }
}

/// The explicit `body` parameter, else an object of body-scoped parameters.
fn bind_body(endpoint: &Endpoint, params: &Map<String, Value>) -> Option<Value> {
    if let Some(body) = lookup(params, BODY_PARAM) {
        return Some(body.clone());
    }

    let fields: Map<String, Value> = endpoint
        .parameters_in(Scope::Body)
        .filter_map(|p| {
            let value = lookup(params, &p.name)
                .cloned()
                .or_else(|| p.default.clone().map(Value::String))?;
            Some((p.name.clone(), value))
        })
        .collect();

    (!fields.is_empty()).then_some(Value::Object(fields))
}

fn remap(endpoint: &Endpoint, mut data: Value) -> Result<Value> {
    if let Some(key) = &endpoint.mapper_key {
        data = data
            .get_mut(key)
            .map(Value::take)
            .filter(|v| !v.is_null())
            .ok_or_else(|| Error::MapperKeyNotFound(key.clone()))?;
    }
    if let Some(mapper) = &endpoint.mapper {
        data = mapper(data).map_err(Error::Mapper)?;
    }
    Ok(data)
}
