//! Configuration file and `config` subcommand
//!
//! Settings live in `~/.approvals/config.toml`. Command-line flags and
//! environment variables take precedence over the file; the file takes
//! precedence over built-in defaults.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

const CONFIG_TEMPLATE: &str = r#"# approvals configuration

[server]
# bind = "0.0.0.0:8080"
# database_url = "postgres://localhost/requestsapproval"
# max_connections = 5
"#;

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApprovalsConfig {
    #[serde(default)]
    pub server: ServerSection,
}

/// `[server]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
}

impl ApprovalsConfig {
    /// Directory holding config.toml and .env: ~/.approvals
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".approvals")
    }

    /// Get config file path: ~/.approvals/config.toml
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| {
            format!("Failed to parse config file (invalid TOML): {}", path.display())
        })
    }
}

/// Load `.env` from the working directory, then `~/.approvals/.env`.
///
/// Variables already set in the environment are never overwritten.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
    dotenvy::from_path(ApprovalsConfig::config_dir().join(".env")).ok();
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a commented config template
    Init(InitArgs),
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(&ApprovalsConfig::config_path(), args.force),
        ConfigCommands::Path => {
            println!("{}", ApprovalsConfig::config_path().display());
            Ok(())
        }
    }
}

fn run_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}\n\nUse --force to overwrite",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Wrote {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = ApprovalsConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.server.bind.is_none());
        assert!(config.server.database_url.is_none());
    }

    #[test]
    fn parses_server_section() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [server]
            bind = "127.0.0.1:9000"
            database_url = "postgres://db/requestsapproval"
            max_connections = 12
            "#,
        )
        .unwrap();

        let config = ApprovalsConfig::load_from(&path).unwrap();
        assert_eq!(config.server.bind, Some("127.0.0.1:9000".parse().unwrap()));
        assert_eq!(
            config.server.database_url.as_deref(),
            Some("postgres://db/requestsapproval")
        );
        assert_eq!(config.server.max_connections, Some(12));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbind = ").unwrap();

        let err = ApprovalsConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server]\nport = 8080\n").unwrap();

        assert!(ApprovalsConfig::load_from(&path).is_err());
    }

    #[test]
    fn template_parses_to_defaults() {
        let config: ApprovalsConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert!(config.server.database_url.is_none());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        run_init(&path, false).unwrap();
        assert!(path.exists());
        assert!(run_init(&path, false).is_err());
        run_init(&path, true).unwrap();
    }
}
