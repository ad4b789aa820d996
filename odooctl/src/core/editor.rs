//! Command-line construction for the editor launcher.

use std::ffi::OsString;
use std::path::Path;

/// Location in a file to open the editor at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: Option<u32>,
    pub column: Option<u32>,
}

/// Arguments passed to the editor binary: `--line`/`--column` only when set,
/// then the path.
pub fn editor_args(path: &Path, position: Position) -> Vec<OsString> {
    let mut args = Vec::with_capacity(5);
    if let Some(line) = position.line {
        args.push(OsString::from("--line"));
        args.push(OsString::from(line.to_string()));
    }
    if let Some(column) = position.column {
        args.push(OsString::from("--column"));
        args.push(OsString::from(column.to_string()));
    }
    args.push(path.as_os_str().to_os_string());
    args
}
