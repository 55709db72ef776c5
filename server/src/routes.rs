//! HTTP handlers and their request/response records.
//!
//! Handlers translate JSON into store calls and back; they hold no state of
//! their own. Validation of the payload shape happens in the `Json`
//! extractor, validation of values in the store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{NewTodo, TodoItem, TodoPatch, TodoStats, TodoStore};

pub type SharedStore = Arc<TodoStore>;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: u64,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: serde_json::Value,
}

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Todo List API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: serde_json::json!({
            "GET /todos": "Get all todos",
            "GET /todos/{id}": "Get todo by ID",
            "POST /todos": "Create new todo",
            "PUT /todos/{id}": "Update todo",
            "DELETE /todos/{id}": "Delete todo",
            "GET /todos/stats": "Get todo statistics",
        }),
    })
}

pub async fn list_todos(State(store): State<SharedStore>) -> Json<Vec<TodoItem>> {
    Json(store.list_all().await)
}

pub async fn todo_stats(State(store): State<SharedStore>) -> Json<TodoStats> {
    Json(store.stats().await)
}

pub async fn get_todo(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<Json<TodoItem>, StoreError> {
    store.get(id).await.map(Json)
}

pub async fn create_todo(
    State(store): State<SharedStore>,
    Json(input): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoItem>), StoreError> {
    let todo = store
        .create(NewTodo {
            title: input.title,
            description: input.description,
            completed: input.completed,
        })
        .await?;
    tracing::info!(id = todo.id, title = %todo.title, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTodoRequest>,
) -> Result<Json<TodoItem>, StoreError> {
    let patch = TodoPatch {
        title: input.title,
        description: input.description,
        completed: input.completed,
    };
    store.update(id, patch).await.map(Json)
}

pub async fn delete_todo(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>, StoreError> {
    let deleted = store.delete(id).await?;
    tracing::info!(id, "todo deleted");
    Ok(Json(DeleteResponse {
        message: format!("Todo '{}' deleted successfully", deleted.title),
        id: deleted.id,
        title: deleted.title,
    }))
}
