//! The six todo tools and their dispatch.
//!
//! Each tool deserializes its arguments, performs one REST call through the
//! transport and renders the result as text. Failures of any kind come back
//! as an error `CallToolResult`; nothing here panics or propagates.

use serde::Deserialize;
use serde_json::{json, Value};
use todo_core::{ApiError, CreateTodo, TodoClient, UpdateTodo};

use crate::protocol::{CallToolResult, ToolSchema};
use crate::render;
use crate::transport::Transport;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    #[error("todo {0} not found")]
    NotFound(u64),

    #[error("cannot reach the todo API at {base_url}, make sure todo-server is running ({detail})")]
    Unavailable { base_url: String, detail: String },

    #[error(transparent)]
    Api(ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoTool {
    GetTodos,
    GetTodoStats,
    CreateTodo,
    UpdateTodo,
    DeleteTodo,
    GetTodoById,
}

impl TodoTool {
    pub const ALL: [TodoTool; 6] = [
        TodoTool::GetTodos,
        TodoTool::GetTodoStats,
        TodoTool::CreateTodo,
        TodoTool::UpdateTodo,
        TodoTool::DeleteTodo,
        TodoTool::GetTodoById,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TodoTool::GetTodos => "get_todos",
            TodoTool::GetTodoStats => "get_todo_stats",
            TodoTool::CreateTodo => "create_todo",
            TodoTool::UpdateTodo => "update_todo",
            TodoTool::DeleteTodo => "delete_todo",
            TodoTool::GetTodoById => "get_todo_by_id",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn schema(self) -> ToolSchema {
        let (description, input_schema) = match self {
            TodoTool::GetTodos => ("Get all todos", json_schema_object(json!({}), vec![])),
            TodoTool::GetTodoStats => (
                "Get statistics about todos (total, completed, pending)",
                json_schema_object(json!({}), vec![]),
            ),
            TodoTool::CreateTodo => (
                "Create a new todo item",
                json_schema_object(
                    json!({
                        "title": json_schema_string("Title of the todo"),
                        "description": json_schema_string("Description of the todo (optional)"),
                        "completed": json_schema_boolean("Whether the todo is completed (default: false)"),
                    }),
                    vec!["title"],
                ),
            ),
            TodoTool::UpdateTodo => (
                "Update an existing todo",
                json_schema_object(
                    json!({
                        "id": json_schema_integer("ID of the todo to update"),
                        "title": json_schema_string("New title (optional)"),
                        "description": json_schema_string("New description (optional)"),
                        "completed": json_schema_boolean("New completion status (optional)"),
                    }),
                    vec!["id"],
                ),
            ),
            TodoTool::DeleteTodo => (
                "Delete a todo by ID",
                json_schema_object(
                    json!({ "id": json_schema_integer("ID of the todo to delete") }),
                    vec!["id"],
                ),
            ),
            TodoTool::GetTodoById => (
                "Get a specific todo by ID",
                json_schema_object(
                    json!({ "id": json_schema_integer("ID of the todo to retrieve") }),
                    vec!["id"],
                ),
            ),
        };
        ToolSchema {
            name: self.name().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    #[serde(alias = "todo_id")]
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct IdArgs {
    #[serde(alias = "todo_id")]
    id: u64,
}

/// Tool dispatcher bound to one API base URL and one transport.
pub struct TodoTools<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoTools<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn schemas(&self) -> Vec<ToolSchema> {
        TodoTool::ALL.into_iter().map(TodoTool::schema).collect()
    }

    pub fn call(&self, name: &str, arguments: Value) -> CallToolResult {
        match self.run(name, arguments) {
            Ok(text) => CallToolResult::text(text),
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "tool call failed");
                CallToolResult::error(err)
            }
        }
    }

    fn run(&self, name: &str, arguments: Value) -> Result<String, ToolError> {
        let tool = TodoTool::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let arguments = if arguments.is_null() { json!({}) } else { arguments };
        tracing::info!(tool = name, "calling tool");

        match tool {
            TodoTool::GetTodos => {
                let response = self.send(self.client.build_list_todos(), None)?;
                let todos = self.client.parse_list_todos(response).map_err(|e| self.classify(e, None))?;
                Ok(render::todo_list(&todos))
            }
            TodoTool::GetTodoStats => {
                let response = self.send(self.client.build_todo_stats(), None)?;
                let stats = self.client.parse_todo_stats(response).map_err(|e| self.classify(e, None))?;
                Ok(render::stats(&stats))
            }
            TodoTool::CreateTodo => {
                let args: CreateArgs = serde_json::from_value(arguments)?;
                let request = self
                    .client
                    .build_create_todo(&CreateTodo {
                        title: args.title,
                        description: args.description,
                        completed: args.completed,
                    })
                    .map_err(|e| self.classify(e, None))?;
                let response = self.send(request, None)?;
                let todo = self.client.parse_create_todo(response).map_err(|e| self.classify(e, None))?;
                Ok(render::created(&todo))
            }
            TodoTool::UpdateTodo => {
                let args: UpdateArgs = serde_json::from_value(arguments)?;
                let id = Some(args.id);
                let patch = UpdateTodo {
                    title: args.title,
                    description: args.description,
                    completed: args.completed,
                };
                let request = self
                    .client
                    .build_update_todo(args.id, &patch)
                    .map_err(|e| self.classify(e, id))?;
                let response = self.send(request, id)?;
                let todo = self.client.parse_update_todo(response).map_err(|e| self.classify(e, id))?;
                Ok(render::updated(&todo))
            }
            TodoTool::DeleteTodo => {
                let IdArgs { id } = serde_json::from_value(arguments)?;
                let response = self.send(self.client.build_delete_todo(id), Some(id))?;
                let confirmation = self
                    .client
                    .parse_delete_todo(response)
                    .map_err(|e| self.classify(e, Some(id)))?;
                Ok(confirmation.message)
            }
            TodoTool::GetTodoById => {
                let IdArgs { id } = serde_json::from_value(arguments)?;
                let response = self.send(self.client.build_get_todo(id), Some(id))?;
                let todo = self.client.parse_get_todo(response).map_err(|e| self.classify(e, Some(id)))?;
                Ok(render::details(&todo))
            }
        }
    }

    fn send(
        &self,
        request: todo_core::HttpRequest,
        id: Option<u64>,
    ) -> Result<todo_core::HttpResponse, ToolError> {
        self.transport.execute(request).map_err(|e| self.classify(e, id))
    }

    fn classify(&self, err: ApiError, id: Option<u64>) -> ToolError {
        match (err, id) {
            (ApiError::NotFound, Some(id)) => ToolError::NotFound(id),
            (ApiError::UpstreamUnavailable(detail), _) => ToolError::Unavailable {
                base_url: self.client.base_url().to_string(),
                detail,
            },
            (err, _) => ToolError::Api(err),
        }
    }
}

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_integer(description: &str) -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> Value {
    json!({
        "type": "boolean",
        "description": description
    })
}
