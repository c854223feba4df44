//! Command-line interface for mockgate.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::report::{self, JsonReport};
use crate::request::RequestOptions;
use crate::todo::{TodoList, TODOS_PATH};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Fetch resources from the to-do API, with fixture mocking in development.
///
/// When MOCKGATE_ENV is `development` or `test`, requests for catalogued
/// paths are answered from local fixtures instead of the network.
#[derive(Parser)]
#[command(name = "mockgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to settings YAML file (default: auto-discover)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and list to-do items
    #[command(visible_alias = "ls")]
    Todos(FetchArgs),
    /// Fetch an arbitrary path and print its body
    Get(GetArgs),
    /// List catalogued mock paths
    Fixtures,
}

/// Options shared by fetching commands.
#[derive(Args)]
pub struct FetchArgs {
    /// Override the base URL for this request
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Simulate the path's configured error (development/test only)
    #[arg(long)]
    pub mock_error: bool,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the get command.
#[derive(Args)]
pub struct GetArgs {
    /// Request path, e.g. /todos/1
    pub path: String,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Install the tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "mockgate=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the parsed command line.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let gateway = match settings.build_gateway() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    match &cli.command {
        Commands::Todos(args) => run_todos(&gateway, args),
        Commands::Get(args) => run_get(&gateway, args),
        Commands::Fixtures => run_fixtures(&gateway),
    }
}

/// Validate fetch options and turn them into request options.
fn request_options(gateway: &Gateway, args: &FetchArgs) -> Result<RequestOptions, String> {
    if args.format != "pretty" && args.format != "json" {
        return Err(format!(
            "invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        ));
    }
    if args.mock_error && !gateway.mocking_active() {
        return Err(
            "--mock-error requires MOCKGATE_ENV=development or MOCKGATE_ENV=test".to_string(),
        );
    }

    let mut options = RequestOptions::new().mock_error(args.mock_error);
    if let Some(url) = &args.base_url {
        options = options.base_url(url.clone());
    }
    Ok(options)
}

fn source_label(gateway: &Gateway, path: &str, options: &RequestOptions) -> String {
    let base = options
        .base_url
        .as_deref()
        .unwrap_or_else(|| gateway.default_base_url());
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Run the todos command.
pub fn run_todos(gateway: &Gateway, args: &FetchArgs) -> anyhow::Result<i32> {
    fetch_and_print(gateway, TODOS_PATH, args, true)
}

/// Run the get command.
pub fn run_get(gateway: &Gateway, args: &GetArgs) -> anyhow::Result<i32> {
    fetch_and_print(gateway, &args.path, &args.fetch, false)
}

fn fetch_and_print(
    gateway: &Gateway,
    path: &str,
    args: &FetchArgs,
    as_todos: bool,
) -> anyhow::Result<i32> {
    let options = match request_options(gateway, args) {
        Ok(o) => o,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return Ok(EXIT_ERROR);
        }
    };
    let source = source_label(gateway, path, &options);
    let mocked = gateway.mocking_active() && gateway.catalog().is_mocked(path);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(gateway.request(path, options));

    let envelope = match result {
        Ok(envelope) => envelope,
        Err(e) => return report_failure(path, &e, mocked, &args.format),
    };

    if args.format == "json" {
        report::write_json(&JsonReport::success(path, envelope.data, envelope.is_mock))?;
    } else if as_todos {
        let list: TodoList = match serde_json::from_value(envelope.data) {
            Ok(list) => list,
            Err(e) => {
                let err = GatewayError::from(e);
                return report_failure(path, &err, envelope.is_mock, &args.format);
            }
        };
        report::write_todos_pretty(&source, &list, envelope.is_mock);
    } else {
        report::write_body_pretty(&source, &envelope.data, envelope.is_mock)?;
    }

    Ok(EXIT_SUCCESS)
}

fn report_failure(
    path: &str,
    err: &GatewayError,
    mocked: bool,
    format: &str,
) -> anyhow::Result<i32> {
    if format == "json" {
        report::write_json(&JsonReport::failure(path, err, mocked))?;
    } else {
        report::write_error_pretty(err);
    }
    Ok(EXIT_FAILED)
}

/// Run the fixtures command.
pub fn run_fixtures(gateway: &Gateway) -> anyhow::Result<i32> {
    report::write_fixtures(gateway.catalog(), gateway.mocking_active());
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalog;

    fn gateway(mocking: bool) -> Gateway {
        Gateway::builder()
            .mocking(mocking)
            .catalog(MockCatalog::builtin())
            .build()
            .unwrap()
    }

    fn fetch_args(format: &str, mock_error: bool) -> FetchArgs {
        FetchArgs {
            base_url: None,
            mock_error,
            format: format.to_string(),
        }
    }

    #[test]
    fn test_cli_parses_todos_with_mock_error() {
        let cli = Cli::parse_from(["mockgate", "todos", "--mock-error", "-f", "json"]);
        match cli.command {
            Commands::Todos(args) => {
                assert!(args.mock_error);
                assert_eq!(args.format, "json");
            }
            _ => panic!("expected todos"),
        }
    }

    #[test]
    fn test_cli_parses_get_with_global_config() {
        let cli = Cli::parse_from(["mockgate", "get", "/todos/1", "--config", "x.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
        match cli.command {
            Commands::Get(args) => assert_eq!(args.path, "/todos/1"),
            _ => panic!("expected get"),
        }
    }

    #[test]
    fn test_mock_error_rejected_when_mocking_inactive() {
        let err = request_options(&gateway(false), &fetch_args("pretty", true)).unwrap_err();
        assert!(err.contains("--mock-error"));
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(request_options(&gateway(true), &fetch_args("sarif", false)).is_err());
    }

    #[test]
    fn test_request_options_carry_flags() {
        let mut args = fetch_args("json", true);
        args.base_url = Some("http://localhost:1234".to_string());
        let options = request_options(&gateway(true), &args).unwrap();
        assert!(options.mock_error);
        assert_eq!(options.base_url.as_deref(), Some("http://localhost:1234"));
    }

    #[test]
    fn test_source_label() {
        let gw = gateway(true);
        assert_eq!(
            source_label(&gw, "/todos", &RequestOptions::new()),
            "https://dummyjson.com/todos"
        );
        assert_eq!(
            source_label(&gw, "/todos", &RequestOptions::new().base_url("http://h/")),
            "http://h/todos"
        );
    }

    #[test]
    fn test_mocked_todos_exit_success() {
        let code = run_todos(&gateway(true), &fetch_args("json", false)).unwrap();
        assert_eq!(code, EXIT_SUCCESS);
    }

    #[test]
    fn test_undecodable_todos_exit_failed() {
        let catalog = MockCatalog::builder()
            .fixture("/todos", serde_json::json!("not a list"))
            .build();
        let gw = Gateway::builder()
            .mocking(true)
            .catalog(std::sync::Arc::new(catalog))
            .build()
            .unwrap();
        let code = run_todos(&gw, &fetch_args("pretty", false)).unwrap();
        assert_eq!(code, EXIT_FAILED);
    }

    #[test]
    fn test_simulated_error_json_exit_failed() {
        let code = run_todos(&gateway(true), &fetch_args("json", true)).unwrap();
        assert_eq!(code, EXIT_FAILED);
    }

    #[test]
    fn test_missing_mock_error_exit_failed() {
        let catalog = MockCatalog::builder()
            .fixture("/users", serde_json::json!([]))
            .build();
        let gw = Gateway::builder()
            .mocking(true)
            .catalog(std::sync::Arc::new(catalog))
            .build()
            .unwrap();
        let args = GetArgs {
            path: "/users".to_string(),
            fetch: fetch_args("pretty", true),
        };
        assert_eq!(run_get(&gw, &args).unwrap(), EXIT_FAILED);
    }

    #[test]
    fn test_simulated_error_exit_failed() {
        let code = run_todos(&gateway(true), &fetch_args("pretty", true)).unwrap();
        assert_eq!(code, EXIT_FAILED);
    }
}
