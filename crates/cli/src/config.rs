//! Configuration loading from gatekeep.toml.

use fetcher::FetcherConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// The context actions are authorized against.
    #[serde(default)]
    pub context: ArticleContext,

    /// Transport for actions backed by remote endpoints.
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// Who is acting, and on which article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleContext {
    pub user: User,
    pub article: Article,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub author_id: String,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl Default for ArticleContext {
    /// An admin looking at their own article.
    fn default() -> Self {
        Self {
            user: User {
                id: "123".to_string(),
                roles: vec!["admin".to_string()],
            },
            article: Article {
                id: "456".to_string(),
                author_id: "123".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config = Config::parse(
            r#"
[context.user]
id = "7"
roles = ["editor"]

[context.article]
id = "42"
author_id = "9"

[fetcher]
base_url = "https://cms.example.com/api"
"#,
        )
        .unwrap();

        assert_eq!(config.context.user.id, "7");
        assert!(config.context.user.has_role("editor"));
        assert!(!config.context.user.has_role("admin"));
        assert_eq!(config.context.article.author_id, "9");
        assert_eq!(
            config.fetcher.base_url.as_deref(),
            Some("https://cms.example.com/api")
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.context.user.id, config.context.article.author_id);
        assert!(config.fetcher.base_url.is_none());
    }

    #[test]
    fn roles_default_to_empty() {
        let config = Config::parse(
            r#"
[context]
user = { id = "1" }
article = { id = "2", author_id = "1" }
"#,
        )
        .unwrap();
        assert!(config.context.user.roles.is_empty());
    }

    #[test]
    fn missing_article_is_parse_error() {
        let err = Config::parse("[context.user]\nid = \"1\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
