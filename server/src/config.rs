use clap::Parser;

/// Command-line and environment configuration for the todo server.
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server")]
#[command(about = "In-memory todo list REST API", long_about = None)]
pub struct ServerConfig {
    /// Host to bind to
    #[arg(long, env = "TODO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "TODO_PORT", default_value_t = 8001)]
    pub port: u16,

    /// Start with a handful of sample todos
    #[arg(long, env = "TODO_SEED")]
    pub seed: bool,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_loopback_8001() {
        let config = ServerConfig::try_parse_from(["todo-server"]).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8001");
        assert!(!config.seed);
    }

    #[test]
    fn flags_override_defaults() {
        let config =
            ServerConfig::try_parse_from(["todo-server", "--host", "0.0.0.0", "-p", "9000", "--seed"])
                .unwrap();
        assert_eq!(config.addr(), "0.0.0.0:9000");
        assert!(config.seed);
    }
}
