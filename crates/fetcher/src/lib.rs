//! Endpoint descriptors translated into HTTP calls.
//!
//! A [`Fetcher`] binds declared [`Endpoint`]s to concrete requests: path
//! placeholders, query strings and bodies are filled from a parameter map,
//! required parameters are enforced, and the response can be narrowed by a
//! mapper key or mapper function.
//!
//! The transport is an injected [`HttpClient`]; [`ReqwestClient`] is the
//! default. There is no global fetcher: build one, wrap it in an `Arc`, and
//! hand it to every [`EndpointExecutor`] that needs it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use actions::{Action, ActionManager};
//! use fetcher::{Endpoint, EndpointExecutor, Fetcher, FetcherConfig, Parameter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = FetcherConfig::parse(r#"base_url = "https://api.example.com""#)?;
//! let fetcher = Arc::new(Fetcher::from_config(&config)?);
//!
//! let delete = Endpoint::new("delete-article", "DELETE", "/articles/:id")
//!     .with_parameter(Parameter::path("id").required());
//!
//! let mut manager: ActionManager<()> = ActionManager::new(());
//! manager.add_action(
//!     Action::unrestricted("delete-article")
//!         .with_executor(Arc::new(EndpointExecutor::new(fetcher, delete))),
//! );
//!
//! manager.execute("delete-article", serde_json::json!({ "id": "456" })).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod endpoint;
mod error;
mod executor;
mod fetcher;

pub use client::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};
pub use config::FetcherConfig;
pub use endpoint::{Endpoint, Mapper, Parameter, Scope};
pub use error::{Error, Result};
pub use executor::EndpointExecutor;
pub use fetcher::Fetcher;
