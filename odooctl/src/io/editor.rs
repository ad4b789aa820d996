//! Editor launcher (PyCharm by default).

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::editor::{Position, editor_args};
use crate::io::process::spawn_detached;

/// Launches an IDE binary on a file.
#[derive(Debug, Clone)]
pub struct Editor {
    bin: PathBuf,
}

impl Editor {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// Open `path` at `position`; with `blocking`, return only after the editor exits.
    ///
    /// The editor's output is discarded. Spawn failures propagate unchanged.
    #[instrument(skip(self), fields(bin = %self.bin.display()))]
    pub fn open(&self, path: &Path, position: Position, blocking: bool) -> Result<()> {
        let mut cmd = Command::new(&self.bin);
        cmd.args(editor_args(path, position));
        info!(path = %path.display(), "opening editor");
        spawn_detached(cmd, blocking)
            .with_context(|| format!("launch editor {}", self.bin.display()))
    }
}
