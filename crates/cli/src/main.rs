mod articles;
mod config;
mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use actions::ActionManager;
use clap::{Parser, Subcommand};
use fetcher::Fetcher;
use serde_json::{Map, Value};

use config::{ArticleContext, Config};
use error::{Error, Result};

const CONFIG_FILE: &str = "gatekeep.toml";

#[derive(Parser)]
#[command(name = "gatekeep")]
#[command(about = "Policy-gated article actions", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Act as this user id
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Act with this role (repeatable; replaces configured roles)
    #[arg(short, long = "role", global = true)]
    roles: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the actions the current user may perform
    List,
    /// Check whether an action is allowed
    Check {
        /// Action ID
        id: String,
    },
    /// Execute an action and print its result
    Exec {
        /// Action ID
        id: String,
        /// Action parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("gatekeep=info,actions=info,policy=warn,fetcher=info")
            }),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let context = override_context(config.context, cli.user, cli.roles);
    let fetcher = if config.fetcher.base_url.is_some() {
        Some(Arc::new(Fetcher::from_config(&config.fetcher)?))
    } else {
        None
    };

    let article_id = context.article.id.clone();
    let mut manager = ActionManager::new(context);
    manager.set_actions(articles::actions(fetcher));

    match cli.command {
        Commands::List => cmd_list(&manager).await,
        Commands::Check { id } => cmd_check(&manager, &id).await,
        Commands::Exec { id, params } => cmd_exec(&manager, &id, &article_id, params).await,
    }
}

async fn cmd_list(manager: &ActionManager<ArticleContext>) -> Result<()> {
    let allowed = manager.get_actions().await;

    if allowed.is_empty() {
        println!("No actions allowed.");
        return Ok(());
    }

    println!("{:<20}  NAME", "ACTION");
    for action in allowed {
        println!("{:<20}  {}", action.id, action.label());
    }
    Ok(())
}

async fn cmd_check(manager: &ActionManager<ArticleContext>, id: &str) -> Result<()> {
    let verdict = if manager.can_execute(id).await {
        "allowed"
    } else {
        "denied"
    };
    println!("{id}: {verdict}");
    Ok(())
}

async fn cmd_exec(
    manager: &ActionManager<ArticleContext>,
    id: &str,
    article_id: &str,
    params: Vec<(String, String)>,
) -> Result<()> {
    let params = article_params(params, article_id)?;
    let result = manager.execute(id, params).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Build action parameters bound to the authorized article.
///
/// Policies decide against the context's article, so an `id` naming any
/// other article is refused rather than acted on.
fn article_params(params: Vec<(String, String)>, article_id: &str) -> Result<Value> {
    let mut map: Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    match map.get("id").and_then(Value::as_str) {
        Some(requested) if requested != article_id => {
            return Err(Error::ArticleMismatch {
                requested: requested.to_string(),
                authorized: article_id.to_string(),
            });
        }
        Some(_) => {}
        None => {
            map.insert("id".to_string(), Value::String(article_id.to_string()));
        }
    }
    Ok(Value::Object(map))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Ok(Config::load(p)?),
        None if Path::new(CONFIG_FILE).exists() => Ok(Config::load(CONFIG_FILE)?),
        None => {
            tracing::debug!("no {CONFIG_FILE}, using default context");
            Ok(Config::default())
        }
    }
}

fn override_context(
    mut context: ArticleContext,
    user: Option<String>,
    roles: Vec<String>,
) -> ArticleContext {
    if let Some(user) = user {
        context.user.id = user;
    }
    if !roles.is_empty() {
        context.user.roles = roles;
    }
    context
}

fn parse_param(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(Error::InvalidParam(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_splits_on_first_equals() {
        assert_eq!(
            parse_param("title=a=b").unwrap(),
            ("title".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_param("content=").unwrap(),
            ("content".to_string(), String::new())
        );
    }

    #[test]
    fn parse_param_rejects_malformed() {
        assert!(matches!(parse_param("title"), Err(Error::InvalidParam(_))));
        assert!(matches!(parse_param("=x"), Err(Error::InvalidParam(_))));
    }

    #[test]
    fn article_params_default_to_context_article() {
        let params = article_params(vec![("title".to_string(), "New".to_string())], "456").unwrap();
        assert_eq!(params, serde_json::json!({ "id": "456", "title": "New" }));
    }

    #[test]
    fn article_params_accept_matching_id() {
        let params = article_params(vec![("id".to_string(), "456".to_string())], "456").unwrap();
        assert_eq!(params, serde_json::json!({ "id": "456" }));
    }

    #[test]
    fn article_params_refuse_other_article() {
        let err = article_params(vec![("id".to_string(), "999".to_string())], "456").unwrap_err();
        assert!(matches!(
            err,
            Error::ArticleMismatch { ref requested, ref authorized }
                if requested == "999" && authorized == "456"
        ));
    }

    #[test]
    fn overrides_replace_user_and_roles() {
        let context = override_context(
            ArticleContext::default(),
            Some("999".to_string()),
            vec!["editor".to_string()],
        );
        assert_eq!(context.user.id, "999");
        assert_eq!(context.user.roles, ["editor"]);
    }

    #[test]
    fn no_overrides_keep_context() {
        let context = override_context(ArticleContext::default(), None, Vec::new());
        assert_eq!(context, ArticleContext::default());
    }

    #[test]
    fn cli_parses_exec_params() {
        let cli = Cli::try_parse_from([
            "gatekeep",
            "exec",
            "edit-article",
            "--param",
            "title=New",
            "-p",
            "content=Body",
            "--role",
            "editor",
        ])
        .unwrap();

        assert_eq!(cli.roles, ["editor"]);
        match cli.command {
            Commands::Exec { id, params } => {
                assert_eq!(id, "edit-article");
                assert_eq!(params.len(), 2);
            }
            _ => panic!("expected exec"),
        }
    }
}
