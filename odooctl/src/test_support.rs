//! Test-only fakes for the process table, workspace source and picker.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::core::instance::Workspace;
use crate::io::picker::{Picker, PickerOutput};
use crate::io::process_table::{ProcessEntry, ProcessTable, Termination};
use crate::io::workspaces::WorkspaceSource;

/// Create a temporary workspace directory with a canonical path.
///
/// The returned `TempDir` must be kept alive for the duration of the test.
pub fn workspace_dir(name: &str, version: &str) -> (TempDir, Workspace) {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = fs::canonicalize(temp.path()).expect("canonicalize tempdir");
    let workspace = Workspace {
        name: name.to_string(),
        path,
        version: version.to_string(),
    };
    (temp, workspace)
}

/// A python process running `odoo-bin` with extra `args` from `cwd`.
pub fn odoo_process(pid: u32, args: &[&str], cwd: &Path) -> ProcessEntry {
    let mut all_args = vec!["/src/odoo/odoo-bin".to_string()];
    all_args.extend(args.iter().map(|arg| arg.to_string()));
    ProcessEntry {
        pid,
        exe: Some(PathBuf::from("/usr/bin/python3.12")),
        args: all_args,
        cwd: Some(cwd.to_path_buf()),
    }
}

/// Process table returning fixed entries and recording termination requests.
#[derive(Debug, Default)]
pub struct FakeProcessTable {
    entries: Vec<ProcessEntry>,
    gone: HashSet<u32>,
    terminated: RefCell<Vec<u32>>,
}

impl FakeProcessTable {
    pub fn new(entries: Vec<ProcessEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Report `pid` as already exited when asked to terminate it.
    pub fn with_gone(mut self, pid: u32) -> Self {
        self.gone.insert(pid);
        self
    }

    /// Pids passed to `terminate`, in call order.
    pub fn terminated(&self) -> Vec<u32> {
        self.terminated.borrow().clone()
    }
}

impl ProcessTable for FakeProcessTable {
    fn scan(&self) -> Result<Vec<ProcessEntry>> {
        Ok(self.entries.clone())
    }

    fn terminate(&self, pid: u32) -> Result<Termination> {
        self.terminated.borrow_mut().push(pid);
        if self.gone.contains(&pid) {
            Ok(Termination::Gone)
        } else {
            Ok(Termination::Requested)
        }
    }
}

/// Workspace source returning a fixed list, or a fixed error.
#[derive(Debug)]
pub struct StaticWorkspaces {
    result: std::result::Result<Vec<Workspace>, String>,
}

impl StaticWorkspaces {
    pub fn new(workspaces: Vec<Workspace>) -> Self {
        Self {
            result: Ok(workspaces),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
        }
    }
}

impl WorkspaceSource for StaticWorkspaces {
    fn list(&self) -> Result<Vec<Workspace>> {
        self.result.clone().map_err(|message| anyhow!(message))
    }
}

/// One recorded picker invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerCall {
    pub lines: usize,
    pub input: String,
}

/// Picker returning a canned result and recording its invocations.
#[derive(Debug)]
pub struct ScriptedPicker {
    result: std::result::Result<PickerOutput, String>,
    calls: RefCell<Vec<PickerCall>>,
}

impl ScriptedPicker {
    pub fn new(exit_code: Option<i32>, stdout: &str) -> Self {
        Self {
            result: Ok(PickerOutput {
                exit_code,
                stdout: stdout.to_string(),
            }),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Picker that exits 0 printing `stdout`.
    pub fn selecting(stdout: &str) -> Self {
        Self::new(Some(0), stdout)
    }

    /// Picker whose invocation fails, as when the binary cannot be spawned.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PickerCall> {
        self.calls.borrow().clone()
    }
}

impl Picker for ScriptedPicker {
    fn pick(&self, lines: usize, input: &[u8]) -> Result<PickerOutput> {
        self.calls.borrow_mut().push(PickerCall {
            lines,
            input: String::from_utf8_lossy(input).into_owned(),
        });
        self.result.clone().map_err(|message| anyhow!(message))
    }
}
