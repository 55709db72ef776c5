use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;

use todo_server::{config::ServerConfig, TodoStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,tower_http=debug".into()),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::parse();

    let store = Arc::new(TodoStore::new());
    if config.seed {
        store.seed_samples().await?;
        tracing::info!("seeded sample todos");
    }

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    todo_server::run(listener, store).await?;
    Ok(())
}
