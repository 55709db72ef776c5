//! In-memory todo store.
//!
//! # Design
//! `TodoStore` is an owned value handed to the router as state; nothing is
//! global, so every test builds its own store. Items live in a `BTreeMap`
//! keyed by id. Ids only ever increase, so ascending key order is insertion
//! order. A single `RwLock` guards both the map and the id counter so that
//! allocation and insertion happen under the same write guard.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::StoreError;

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoItem {
    /// Refresh `updated_at`. It always moves strictly forward, even when the
    /// clock has not ticked since the previous mutation.
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Fields accepted when creating a todo.
#[derive(Clone, Debug, Default)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Partial update: `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Identity of a removed item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deleted {
    pub id: u64,
    pub title: String,
}

/// Aggregate counts over the current collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of completed items, two decimals. Zero for an empty store.
    pub completion_rate: f64,
}

#[derive(Debug)]
struct Inner {
    todos: BTreeMap<u64, TodoItem>,
    next_id: u64,
}

#[derive(Debug)]
pub struct TodoStore {
    inner: RwLock<Inner>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                todos: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn list_all(&self) -> Vec<TodoItem> {
        self.inner.read().await.todos.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Result<TodoItem, StoreError> {
        self.inner
            .read()
            .await
            .todos
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn create(&self, input: NewTodo) -> Result<TodoItem, StoreError> {
        validate_title(&input.title)?;

        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let todo = TodoItem {
            id: inner.next_id,
            title: input.title,
            description: input.description,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };
        inner.next_id += 1;
        inner.todos.insert(todo.id, todo.clone());
        tracing::debug!(id = todo.id, "created todo");
        Ok(todo)
    }

    pub async fn update(&self, id: u64, patch: TodoPatch) -> Result<TodoItem, StoreError> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }

        let mut inner = self.inner.write().await;
        let todo = inner.todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(description) = patch.description {
            todo.description = Some(description);
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        todo.touch();
        tracing::debug!(id, "updated todo");
        Ok(todo.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<Deleted, StoreError> {
        let removed = self
            .inner
            .write()
            .await
            .todos
            .remove(&id)
            .ok_or(StoreError::NotFound(id))?;
        tracing::debug!(id, "deleted todo");
        Ok(Deleted {
            id: removed.id,
            title: removed.title,
        })
    }

    pub async fn stats(&self) -> TodoStats {
        let inner = self.inner.read().await;
        let (total, completed) = inner
            .todos
            .values()
            .fold((0usize, 0usize), |(total, done), todo| {
                (total + 1, done + usize::from(todo.completed))
            });
        let completion_rate = if total == 0 {
            0.0
        } else {
            (completed as f64 / total as f64 * 10_000.0).round() / 100.0
        };
        TodoStats {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }

    /// Populate the store with a handful of sample items.
    pub async fn seed_samples(&self) -> Result<(), StoreError> {
        const SAMPLES: [(&str, &str, bool); 5] = [
            ("Learn FastAPI", "Complete FastAPI tutorial", false),
            ("Build MCP Server", "Create MCP server for Gemini CLI", false),
            ("Test Integration", "Test FastAPI with MCP server", false),
            ("Deploy Application", "Deploy to production", true),
            ("Write Documentation", "Create API documentation", false),
        ];
        for (title, description, completed) in SAMPLES {
            self.create(NewTodo {
                title: title.to_string(),
                description: Some(description.to_string()),
                completed,
            })
            .await?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::InvalidInput("title must not be empty".to_string()));
    }
    Ok(())
}
