use anyhow::Result;
use clap::Parser;

use todo_bridge::config::BridgeConfig;
use todo_bridge::{HttpTransport, McpServer, TodoTools};
use todo_core::TodoClient;

fn main() -> Result<()> {
    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_bridge=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    let config = BridgeConfig::parse();
    tracing::info!(api_url = %config.api_url, timeout_secs = config.timeout_secs, "starting todo MCP server");

    let tools = TodoTools::new(
        TodoClient::new(&config.api_url),
        HttpTransport::new(config.timeout()),
    );
    let server = McpServer::new(tools);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    server.run(stdin.lock(), stdout.lock())?;
    Ok(())
}
