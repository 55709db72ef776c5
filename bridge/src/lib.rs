//! MCP tool bridge for the todo REST API.
//!
//! Exposes six tools over JSON-RPC on stdio. Every tool call becomes one HTTP
//! request built by `todo-core` and executed by a [`Transport`]; the JSON
//! answer is rendered as text for the assistant runtime.

pub mod config;
pub mod protocol;
pub mod render;
pub mod server;
pub mod tools;
pub mod transport;

pub use server::McpServer;
pub use tools::{TodoTool, TodoTools, ToolError};
pub use transport::{HttpTransport, Transport};
