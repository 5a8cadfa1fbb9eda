//! m365-mcp - Microsoft 365 tools over MCP stdio.

use clap::Parser;
use m365_mcp::config::DEFAULT_LOG_FILE;
use m365_mcp::graph::ClientFactory;
use m365_mcp::mcp::{Dispatcher, McpServer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "m365-mcp")]
#[command(about = "MCP server exposing Microsoft 365 mail, calendar, Teams and profile data")]
#[command(version)]
struct Cli {
    /// Log file path (logs also go to stderr)
    #[arg(long, env = "M365_MCP_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = m365_mcp::logging::init(Some(cli.log_file.as_path()));

    tracing::info!("Starting MCP M365 Server...");

    let server = McpServer::new(Dispatcher::new(ClientFactory::from_env()));
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
