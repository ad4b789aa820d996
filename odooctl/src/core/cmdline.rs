//! Recognition of Odoo server processes from their command line.

use anyhow::{Context, Result};

/// Substring identifying the Python interpreter in the executable path.
pub const INTERPRETER_MARKER: &str = "/python";
/// Substring identifying Odoo in at least one argument.
pub const APPLICATION_MARKER: &str = "odoo";
/// Argument marking the interactive shell subcommand, which is not a server.
pub const SHELL_SUBCOMMAND: &str = "shell";

pub const DATABASE_PREFIX: &str = "--database=";
pub const HTTP_PORT_PREFIX: &str = "--http-port=";
pub const DEFAULT_HTTP_PORT: u16 = 8069;

/// Flags recovered from a server command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerArgs {
    pub database: String,
    pub port: u16,
}

/// Returns true if the process looks like an Odoo server (not a shell).
pub fn is_server_process(exe: Option<&str>, args: &[String]) -> bool {
    let Some(exe) = exe else {
        return false;
    };
    exe.contains(INTERPRETER_MARKER)
        && args.iter().any(|arg| arg.contains(APPLICATION_MARKER))
        && !args.iter().any(|arg| arg == SHELL_SUBCOMMAND)
}

/// Extract `--database=` and `--http-port=` from a server command line.
///
/// Returns `Ok(None)` when no database is given. A port that is present but
/// not a valid `u16` is an error.
pub fn parse_server_args(args: &[String]) -> Result<Option<ServerArgs>> {
    let Some(database) = find_flag(args, DATABASE_PREFIX) else {
        return Ok(None);
    };
    let port = match find_flag(args, HTTP_PORT_PREFIX) {
        Some(raw) => raw
            .parse::<u16>()
            .with_context(|| format!("invalid http port {raw:?}"))?,
        None => DEFAULT_HTTP_PORT,
    };
    Ok(Some(ServerArgs {
        database: database.to_string(),
        port,
    }))
}

/// Value of the first argument starting with `prefix`.
fn find_flag<'a>(args: &'a [String], prefix: &str) -> Option<&'a str> {
    args.iter().find_map(|arg| arg.strip_prefix(prefix))
}
