//! Line-delimited JSON-RPC loop serving the todo tools.
//!
//! Runs on the calling thread with blocking I/O: one request is read, handled
//! and answered before the next line is read. Notifications get no reply.

use std::io::{self, BufRead, Write};

use serde::Serialize;
use serde_json::{json, Value};

use crate::protocol::{
    CallToolParams, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    PROTOCOL_VERSION,
};
use crate::tools::TodoTools;
use crate::transport::Transport;

pub const SERVER_NAME: &str = "todo-mcp";

pub struct McpServer<T> {
    tools: TodoTools<T>,
}

impl<T: Transport> McpServer<T> {
    pub fn new(tools: TodoTools<T>) -> Self {
        Self { tools }
    }

    /// Serve until `input` is exhausted. Only an I/O error ends the loop early;
    /// a line that is not UTF-8 is answered with a parse error.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line.trim_end()),
                Err(e) => {
                    tracing::warn!(error = %e, "message is not valid UTF-8");
                    Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(e)))
                }
            };
            if let Some(response) = response {
                serde_json::to_writer(&mut output, &response)?;
                output.write_all(b"\n")?;
                output.flush()?;
            }
        }
        tracing::info!("input closed, stopping");
        Ok(())
    }

    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "unparsable message");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(e)));
            }
        };
        let echo_id = message.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "malformed request");
                return Some(JsonRpcResponse::error(echo_id, JsonRpcError::invalid_request(e)));
            }
        };

        let Some(id) = request.id else {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        };

        Some(match self.dispatch(&request.method, request.params) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => {
                let params: InitializeParams = match params {
                    Some(p) => serde_json::from_value(p)
                        .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?,
                    None => InitializeParams::default(),
                };
                if let Some(client) = &params.client_info {
                    tracing::info!(client = %client.name, version = %client.version, "client connected");
                }
                to_result(InitializeResult {
                    protocol_version: params
                        .protocol_version
                        .unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME.to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                })
            }
            "ping" => Ok(json!({})),
            "tools/list" => to_result(ListToolsResult {
                tools: self.tools.schemas(),
            }),
            "tools/call" => {
                let params: CallToolParams = params
                    .ok_or_else(|| JsonRpcError::invalid_params("missing params"))
                    .and_then(|p| {
                        serde_json::from_value(p)
                            .map_err(|e| JsonRpcError::invalid_params(e.to_string()))
                    })?;
                to_result(self.tools.call(&params.name, params.arguments))
            }
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }
}

fn to_result(value: impl Serialize) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
