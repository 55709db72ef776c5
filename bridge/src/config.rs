use std::time::Duration;

use clap::Parser;

/// Startup configuration for the tool bridge.
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-mcp")]
#[command(about = "MCP tool server forwarding todo tools to the todo REST API", long_about = None)]
pub struct BridgeConfig {
    /// Base URL of the todo REST API
    #[arg(long, env = "TODO_API_URL", default_value = "http://localhost:8001")]
    pub api_url: String,

    /// Timeout for each request to the API, in seconds
    #[arg(long, env = "TODO_API_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,
}

impl BridgeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
