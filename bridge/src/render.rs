//! Plain-text rendering of API results for the assistant runtime.

use chrono::{DateTime, Utc};
use todo_core::{Todo, TodoStats};

const DONE: &str = "✅";
const PENDING: &str = "⏳";
const NO_DESCRIPTION: &str = "No description";

pub fn todo_list(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No todos found.".to_string();
    }
    let lines: Vec<String> = todos
        .iter()
        .map(|todo| {
            format!(
                "ID: {} | {} | {} | {}",
                todo.id,
                todo.title,
                if todo.completed { DONE } else { PENDING },
                description(todo),
            )
        })
        .collect();
    format!("All Todos:\n{}", lines.join("\n"))
}

pub fn stats(stats: &TodoStats) -> String {
    format!(
        "Todo Statistics:\nTotal Todos: {}\nCompleted: {}\nPending: {}\nCompletion Rate: {}%",
        stats.total,
        stats.completed,
        stats.pending,
        completion_rate(stats)
    )
}

/// `0` for an empty list, otherwise at least one decimal: `20.0`, `33.33`.
fn completion_rate(stats: &TodoStats) -> String {
    if stats.total == 0 {
        "0".to_string()
    } else if stats.completion_rate.fract() == 0.0 {
        format!("{:.1}", stats.completion_rate)
    } else {
        stats.completion_rate.to_string()
    }
}

pub fn created(todo: &Todo) -> String {
    format!("Created todo: {} (ID: {})", todo.title, todo.id)
}

pub fn updated(todo: &Todo) -> String {
    format!("Updated todo: {} (ID: {})", todo.title, todo.id)
}

pub fn details(todo: &Todo) -> String {
    let status = if todo.completed {
        format!("{DONE} Completed")
    } else {
        format!("{PENDING} Pending")
    };
    format!(
        "Todo Details:\nID: {}\nTitle: {}\nDescription: {}\nStatus: {}\nCreated: {}\nUpdated: {}",
        todo.id,
        todo.title,
        description(todo),
        status,
        timestamp(&todo.created_at),
        timestamp(&todo.updated_at),
    )
}

fn description(todo: &Todo) -> &str {
    todo.description.as_deref().unwrap_or(NO_DESCRIPTION)
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
