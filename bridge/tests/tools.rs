//! Tool calls end to end: JSON-RPC line in, real HTTP to a live todo server,
//! rendered text out.

use std::sync::Arc;
use std::io::Read;
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use todo_bridge::{HttpTransport, McpServer, TodoTools};
use todo_core::TodoClient;
use todo_server::TodoStore;

fn spawn_server(store: TodoStore) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, Arc::new(store)).await
        })
        .unwrap();
    });
    format!("http://{addr}")
}

fn bridge(base_url: &str) -> McpServer<HttpTransport> {
    McpServer::new(TodoTools::new(
        TodoClient::new(base_url),
        HttpTransport::new(Duration::from_secs(5)),
    ))
}

/// Issue one `tools/call` and return `(text, is_error)`.
fn call(server: &McpServer<HttpTransport>, name: &str, arguments: Value) -> (String, bool) {
    let line = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
    .to_string();
    let response = serde_json::to_value(server.handle_line(&line).unwrap()).unwrap();
    let result = &response["result"];
    (
        result["content"][0]["text"].as_str().unwrap().to_string(),
        result["isError"].as_bool().unwrap_or(false),
    )
}

#[test]
fn buy_milk_walk_dog_through_the_tools() {
    let server = bridge(&spawn_server(TodoStore::new()));

    let (text, is_error) = call(&server, "create_todo", json!({"title": "Buy milk"}));
    assert!(!is_error);
    assert_eq!(text, "Created todo: Buy milk (ID: 1)");

    let (text, _) = call(&server, "create_todo", json!({"title": "Walk dog", "description": "park"}));
    assert_eq!(text, "Created todo: Walk dog (ID: 2)");

    let (text, _) = call(&server, "get_todos", json!({}));
    assert_eq!(
        text,
        "All Todos:\nID: 1 | Buy milk | ⏳ | No description\nID: 2 | Walk dog | ⏳ | park"
    );

    let (text, _) = call(&server, "delete_todo", json!({"id": 1}));
    assert_eq!(text, "Todo 'Buy milk' deleted successfully");

    let (text, is_error) = call(&server, "get_todo_by_id", json!({"id": 1}));
    assert!(is_error);
    assert_eq!(text, "Error: todo 1 not found");

    let (text, _) = call(&server, "get_todo_stats", json!({}));
    assert_eq!(
        text,
        "Todo Statistics:\nTotal Todos: 1\nCompleted: 0\nPending: 1\nCompletion Rate: 0.0%"
    );
}

#[test]
fn update_and_inspect_a_seeded_todo() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let store = TodoStore::new();
    runtime.block_on(store.seed_samples()).unwrap();
    let server = bridge(&spawn_server(store));

    let (text, _) = call(&server, "update_todo", json!({"id": 2, "completed": true}));
    assert_eq!(text, "Updated todo: Build MCP Server (ID: 2)");

    let (text, _) = call(&server, "get_todo_by_id", json!({"todo_id": 2}));
    assert!(text.starts_with("Todo Details:\nID: 2\nTitle: Build MCP Server\n"));
    assert!(text.contains("Description: Create MCP server for Gemini CLI"));
    assert!(text.contains("Status: ✅ Completed"));

    let (text, _) = call(&server, "get_todo_stats", json!({}));
    assert!(text.ends_with("Completion Rate: 40.0%"));
}

#[test]
fn empty_title_and_missing_todo_are_plain_errors() {
    let server = bridge(&spawn_server(TodoStore::new()));

    let (text, is_error) = call(&server, "create_todo", json!({"title": ""}));
    assert!(is_error);
    assert_eq!(text, "Error: invalid input: title must not be empty");

    let (text, is_error) = call(&server, "update_todo", json!({"id": 9, "title": "x"}));
    assert!(is_error);
    assert_eq!(text, "Error: todo 9 not found");

    // the rejected create did not consume id 1
    let (text, _) = call(&server, "create_todo", json!({"title": "First"}));
    assert_eq!(text, "Created todo: First (ID: 1)");
}

#[test]
fn unreachable_api_is_reported_as_text() {
    // Grab a free port, then close it so nothing is listening there.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let base_url = format!("http://{addr}");
    let server = McpServer::new(TodoTools::new(
        TodoClient::new(&base_url),
        HttpTransport::new(Duration::from_secs(2)),
    ));

    let (text, is_error) = call(&server, "get_todos", json!({}));
    assert!(is_error);
    assert!(
        text.starts_with(&format!("Error: cannot reach the todo API at {base_url}")),
        "unexpected text: {text}"
    );
}

#[test]
fn silent_api_times_out_as_unreachable() {
    // Accept the connection but never answer.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut sink = Vec::new();
        let _ = stream.read_to_end(&mut sink);
    });
    let server = McpServer::new(TodoTools::new(
        TodoClient::new(&base_url),
        HttpTransport::new(Duration::from_secs(1)),
    ));

    let started = Instant::now();
    let (text, is_error) = call(&server, "get_todo_stats", json!({}));
    assert!(started.elapsed() < Duration::from_secs(5), "took {:?}", started.elapsed());
    assert!(is_error);
    assert!(
        text.starts_with(&format!("Error: cannot reach the todo API at {base_url}")),
        "unexpected text: {text}"
    );
}
