//! Command-line bootstrap for the user store.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Open the store, dispatch one request and print the response envelope.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use userstore_core::db::open_db;
use userstore_core::{
    default_log_level, handle_request, init_logging, LogConfig, Method, Request,
    SqliteRecordStore, UserService,
};

const DEFAULT_DB_FILE_NAME: &str = "userstore.sqlite3";

#[derive(Parser)]
#[command(name = "userstore", about = "CRUD facade over a single-table user store")]
struct Args {
    /// Request method: GET, POST, PUT or DELETE.
    method: String,

    #[arg(long, help = "Email query value (GET one, DELETE)")]
    email: Option<String>,

    #[arg(long, help = "Raw JSON request body (POST, PUT)")]
    body: Option<String>,

    #[arg(long, env = "USERSTORE_DB_PATH", help = "SQLite database file")]
    db_path: Option<PathBuf>,

    #[arg(long, env = "USERSTORE_TABLE_NAME", default_value = "users")]
    table: String,

    #[arg(long, env = "USERSTORE_LOG_LEVEL")]
    log_level: Option<String>,

    #[arg(long, env = "USERSTORE_LOG_DIR", help = "Absolute directory for log files")]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_logging(&LogConfig {
        level: args
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string()),
        dir: args.log_dir.clone(),
    })
    .map_err(anyhow::Error::msg)
    .context("logging init failed")?;

    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let store = SqliteRecordStore::try_new(&conn).context("record store init failed")?;
    let service = UserService::new(store, args.table.as_str());

    let response = handle_request(&build_request(&args), &service);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn build_request(args: &Args) -> Request {
    let method = args
        .method
        .parse::<Method>()
        .unwrap_or_else(|never| match never {});
    let mut request = Request::new(method);
    if let Some(email) = &args.email {
        request = request.with_email(email.as_str());
    }
    if let Some(body) = &args.body {
        request = request.with_body(body.as_str());
    }
    request
}

#[cfg(test)]
mod tests {
    use super::{build_request, Args};
    use clap::Parser;
    use userstore_core::Method;

    #[test]
    fn builds_request_from_flags() {
        let args = Args::parse_from([
            "userstore",
            "delete",
            "--email",
            "a@b.co",
            "--table",
            "people",
        ]);
        let request = build_request(&args);
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.email(), "a@b.co");
        assert_eq!(request.body, None);
        assert_eq!(args.table, "people");
    }

    #[test]
    fn unknown_method_is_kept_for_dispatch() {
        let args = Args::parse_from(["userstore", "patch", "--body", "{}"]);
        let request = build_request(&args);
        assert_eq!(request.method, Method::Other("patch".to_string()));
        assert_eq!(request.body.as_deref(), Some("{}"));
    }
}
