//! Todo REST service backed by an in-memory store.
//!
//! `app` wires the routes to a caller-owned [`TodoStore`]; `run` serves it on
//! an already bound listener until Ctrl-C.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::{ErrorBody, StoreError};
pub use routes::{CreateTodoRequest, DeleteResponse, UpdateTodoRequest};
pub use store::{Deleted, NewTodo, TodoItem, TodoPatch, TodoStats, TodoStore};

pub fn app(store: Arc<TodoStore>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/todos", get(routes::list_todos).post(routes::create_todo))
        .route("/todos/stats", get(routes::todo_stats))
        .route(
            "/todos/{id}",
            get(routes::get_todo)
                .put(routes::update_todo)
                .delete(routes::delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener, store: Arc<TodoStore>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
