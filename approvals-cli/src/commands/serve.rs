//! HTTP server command
//!
//! Resolves settings from flags, environment and config file, builds the
//! request store, and runs the approvals HTTP server until shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use approvals_server::db::{create_pool_with_options, pool::DEFAULT_MAX_CONNECTIONS};
use approvals_server::{run_server, AppState, MemoryRequestStore, PgRequestStore, ServerConfig};

use crate::config::ApprovalsConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to [default: 0.0.0.0:8080]
    #[arg(long, short = 'b', env = "APPROVALS_BIND")]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections [default: 5]
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Keep requests in process memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,

    /// Config file (default: ~/.approvals/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Effective server settings after layering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeSettings {
    pub bind: SocketAddr,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl ServeSettings {
    /// Flags and environment win over the config file, which wins over defaults.
    pub fn resolve(args: &ServeArgs, file: &ApprovalsConfig) -> Self {
        Self {
            bind: args
                .bind
                .or(file.server.bind)
                .unwrap_or_else(|| ServerConfig::default().bind_addr),
            database_url: args
                .database_url
                .clone()
                .or_else(|| file.server.database_url.clone()),
            max_connections: args
                .max_connections
                .or(file.server.max_connections)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => ApprovalsConfig::load_from(path)?,
        None => ApprovalsConfig::load()?,
    };
    let settings = ServeSettings::resolve(&args, &file);

    let state = if args.in_memory {
        tracing::warn!("Using in-memory store; requests are lost on shutdown");
        AppState::new(MemoryRequestStore::new())
    } else {
        let database_url = settings.database_url.as_deref().context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.approvals/config.toml",
        )?;

        let pool = create_pool_with_options(database_url, settings.max_connections)
            .await
            .context("Failed to create database pool")?;
        tracing::info!(max_connections = settings.max_connections, "Database pool ready");

        let store = PgRequestStore::new(pool);
        store
            .migrate()
            .await
            .context("Failed to prepare requests collection")?;
        AppState::new(store)
    };

    tracing::info!("Starting approvals server on {}", settings.bind);

    let config = ServerConfig {
        bind_addr: settings.bind,
    };

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerSection;

    fn file(bind: Option<&str>, url: Option<&str>, max: Option<u32>) -> ApprovalsConfig {
        ApprovalsConfig {
            server: ServerSection {
                bind: bind.map(|b| b.parse().unwrap()),
                database_url: url.map(str::to_owned),
                max_connections: max,
            },
        }
    }

    #[test]
    fn defaults_when_nothing_set() {
        let settings = ServeSettings::resolve(&ServeArgs::default(), &ApprovalsConfig::default());
        assert_eq!(settings.bind, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(settings.database_url, None);
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn config_file_fills_gaps() {
        let settings = ServeSettings::resolve(
            &ServeArgs::default(),
            &file(Some("127.0.0.1:9000"), Some("postgres://file/db"), Some(8)),
        );
        assert_eq!(settings.bind, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(settings.database_url.as_deref(), Some("postgres://file/db"));
        assert_eq!(settings.max_connections, 8);
    }

    #[test]
    fn flags_override_config_file() {
        let args = ServeArgs {
            bind: Some("127.0.0.1:7000".parse().unwrap()),
            database_url: Some("postgres://flag/db".into()),
            max_connections: Some(2),
            ..ServeArgs::default()
        };
        let settings = ServeSettings::resolve(
            &args,
            &file(Some("127.0.0.1:9000"), Some("postgres://file/db"), Some(8)),
        );
        assert_eq!(settings.bind, "127.0.0.1:7000".parse().unwrap());
        assert_eq!(settings.database_url.as_deref(), Some("postgres://flag/db"));
        assert_eq!(settings.max_connections, 2);
    }

    #[test]
    fn parses_flags() {
        let args = ServeArgs::try_parse_from([
            "serve",
            "--bind",
            "127.0.0.1:8181",
            "--database-url",
            "postgres://localhost/requestsapproval",
            "--max-connections",
            "3",
        ])
        .unwrap();
        assert_eq!(args.bind, Some("127.0.0.1:8181".parse().unwrap()));
        assert_eq!(args.max_connections, Some(3));
        assert!(!args.in_memory);
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(ServeArgs::try_parse_from(["serve", "--bind", "not-an-addr"]).is_err());
    }
}
