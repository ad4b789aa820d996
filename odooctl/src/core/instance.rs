//! Instance and workspace records.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A project checkout that Odoo servers run from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub name: String,
    pub path: PathBuf,
    /// Odoo series, e.g. `"17.0"`.
    pub version: String,
}

/// A running Odoo server discovered in the process table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    pub pid: u32,
    pub port: u16,
    pub database: String,
    pub workspace: Workspace,
}

impl Instance {
    /// Loopback host unique to the workspace version.
    ///
    /// Each series gets its own address so browser cookies are not shared
    /// between instances running side by side.
    pub fn host(&self) -> String {
        format!("127.0.0.{}", self.workspace.version.replace('.', ""))
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host(), self.port)
    }
}
