//! Workspace source capability.

use std::fs;

use anyhow::Result;
use tracing::debug;

use crate::core::instance::Workspace;
use crate::io::config::{WorkspaceConfig, expand_home};

/// Provides the known workspaces.
pub trait WorkspaceSource {
    fn list(&self) -> Result<Vec<Workspace>>;
}

/// Workspaces declared in the `[[workspaces]]` table of the config file.
#[derive(Debug, Clone)]
pub struct ConfigWorkspaces {
    entries: Vec<WorkspaceConfig>,
}

impl ConfigWorkspaces {
    pub fn new(entries: Vec<WorkspaceConfig>) -> Self {
        Self { entries }
    }
}

impl WorkspaceSource for ConfigWorkspaces {
    fn list(&self) -> Result<Vec<Workspace>> {
        self.entries
            .iter()
            .map(|entry| {
                let expanded = expand_home(&entry.path)?;
                // Processes report canonical working directories; compare like with like.
                let path = match fs::canonicalize(&expanded) {
                    Ok(path) => path,
                    Err(err) => {
                        debug!(path = %expanded.display(), err = %err, "workspace path not canonicalized");
                        expanded
                    }
                };
                Ok(Workspace {
                    name: entry.name.clone(),
                    path,
                    version: entry.version.clone(),
                })
            })
            .collect()
    }
}
