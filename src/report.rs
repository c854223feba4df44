//! Output formatting for the command-line front end.
//!
//! Supports two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{MockCatalog, MockOutcome};
use crate::error::GatewayError;
use crate::todo::TodoList;

// =============================================================================
// JSON Format
// =============================================================================

/// JSON error body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl From<&GatewayError> for JsonError {
    fn from(err: &GatewayError) -> Self {
        Self {
            message: err.message(),
            code: err.code(),
        }
    }
}

/// JSON envelope printed by `--format json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub mocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

impl JsonReport {
    pub fn success(path: &str, data: Value, mocked: bool) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            mocked,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(path: &str, err: &GatewayError, mocked: bool) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            mocked,
            data: None,
            error: Some(err.into()),
        }
    }
}

/// Write a JSON report to stdout.
pub fn write_json(report: &JsonReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

fn write_header(source: &str, mocked: bool) {
    println!();
    print!("  ");
    print!("{}", "mockgate".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", "Source: ".dimmed());
    if mocked {
        println!("{} {}", source, "(mock)".yellow());
    } else {
        println!("{}", source);
    }
    println!();
}

/// Print the to-do list.
pub fn write_todos_pretty(source: &str, list: &TodoList, mocked: bool) {
    write_header(source, mocked);

    println!("  {}", "Todos".bold());
    if list.todos.is_empty() {
        println!("    {}", "(none)".dimmed());
    }
    for todo in &list.todos {
        let mark = if todo.completed {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        println!("    {} {}", mark, todo.todo);
    }

    println!();
    println!(
        "  {}",
        format!("{} of {} completed", list.completed_count(), list.todos.len()).dimmed()
    );
    println!();
}

/// Print an arbitrary response body.
pub fn write_body_pretty(source: &str, data: &Value, mocked: bool) -> anyhow::Result<()> {
    write_header(source, mocked);
    for line in serde_json::to_string_pretty(data)?.lines() {
        println!("  {}", line);
    }
    println!();
    Ok(())
}

/// Print a failure. The message is shown verbatim.
pub fn write_error_pretty(err: &GatewayError) {
    eprint!("{} ", "Error:".red().bold());
    eprintln!("{}", err.message());
    if err.is_mock_gap() {
        eprintln!(
            "  {}",
            "Add an `errors` entry for this path to the catalog".dimmed()
        );
    }
}

/// Print the catalog contents.
pub fn write_fixtures(catalog: &MockCatalog, mocking_active: bool) {
    println!();
    print!("  {}", "Mocking: ".dimmed());
    if mocking_active {
        println!("{}", "active".green());
    } else {
        println!("{}", "inactive".red());
    }
    println!();

    if catalog.is_empty() {
        println!("  {}", "No fixtures".dimmed());
        println!();
        return;
    }

    println!("  {:<24} {}", "PATH".bold(), "ERROR".bold());
    for path in catalog.paths() {
        let error = match catalog.error(path) {
            Some(MockOutcome::Failure { status, message }) => {
                format!("{} {}", status, message)
            }
            Some(MockOutcome::Success(_)) => "replayed as success".to_string(),
            None => "-".dimmed().to_string(),
        };
        println!("  {:<24} {}", path, error);
    }
    println!();
}
