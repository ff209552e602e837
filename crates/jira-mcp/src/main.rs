//! Jira MCP server binary.
//!
//! This binary runs the MCP server using stdio transport.

use clap::Parser;
use jira_mcp::config::CONFIG_PATH_ENV;
use jira_mcp::{HttpJiraClient, JiraConfig, JiraMcpServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Expose Jira as MCP tools over stdio.
#[derive(Debug, Parser)]
#[command(name = "jira-mcp", version, about)]
struct Cli {
    /// YAML config file. Falls back to $JIRA_MCP_CONFIG.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

    let config = JiraConfig::load(config_path.as_deref(), |key| std::env::var(key).ok()).await?;
    tracing::info!(base_url = %config.base_url, "Starting jira-mcp server");

    let client = HttpJiraClient::new(&config)?;
    let server = JiraMcpServer::new(Arc::new(client));
    server.run().await?;

    Ok(())
}
