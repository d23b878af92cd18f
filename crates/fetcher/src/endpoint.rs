//! Endpoint descriptors.

use std::fmt;
use std::sync::Arc;

use actions::BoxError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transforms a response body after the mapper key has been applied.
pub type Mapper = Arc<dyn Fn(Value) -> Result<Value, BoxError> + Send + Sync>;

/// Where a parameter is placed in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Replaces a `:name` placeholder in the path.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as a field of the JSON body.
    Body,
}

/// A declared endpoint parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Free-form type label, informational only.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    pub scope: Scope,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, scope: Scope) -> Self {
        Self {
            name: name.into(),
            kind: "string".to_string(),
            description: String::new(),
            scope,
            required: false,
            default: None,
        }
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, Scope::Path)
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, Scope::Query)
    }

    pub fn body(name: impl Into<String>) -> Self {
        Self::new(name, Scope::Body)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Required and without a fallback value.
    pub(crate) fn is_mandatory(&self) -> bool {
        self.required && self.default.is_none()
    }
}

/// A remote operation: method, path template and parameters.
///
/// Descriptors deserialize from TOML or JSON; the mapper function can only
/// be attached in code.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub method: String,
    /// Path template with `:name` placeholders, e.g. `/articles/:id`.
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    /// Response field to return instead of the whole body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapper_key: Option<String>,
    #[serde(skip)]
    pub mapper: Option<Mapper>,
}

impl Endpoint {
    pub fn new(id: impl Into<String>, method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_mapper_key(mut self, key: impl Into<String>) -> Self {
        self.mapper_key = Some(key.into());
        self
    }

    pub fn with_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(Value) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.mapper = Some(Arc::new(mapper));
        self
    }

    /// Parameters placed in the given scope.
    pub fn parameters_in(&self, scope: Scope) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(move |p| p.scope == scope)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("id", &self.id)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("parameters", &self.parameters)
            .field("mapper_key", &self.mapper_key)
            .field("mapper", &self.mapper.is_some())
            .finish()
    }
}
