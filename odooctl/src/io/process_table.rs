//! Process table capability.
//!
//! [`ProcessTable`] decouples instance discovery from the live OS process
//! list. Tests use scripted tables that return fixed entries and record
//! termination requests without touching real processes.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System, UpdateKind};
use tracing::{debug, instrument, warn};

/// Snapshot of one OS process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    /// Executable path, when readable.
    pub exe: Option<PathBuf>,
    /// Arguments, excluding argv[0].
    pub args: Vec<String>,
    /// Working directory as reported by the OS (not canonicalized).
    pub cwd: Option<PathBuf>,
}

/// Outcome of a termination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The signal was delivered; the process may still be shutting down.
    Requested,
    /// No process with this pid exists anymore.
    Gone,
    /// The OS refused the signal (e.g. permissions).
    Refused,
}

/// Abstraction over the OS process list.
pub trait ProcessTable {
    /// Enumerate all visible processes.
    fn scan(&self) -> Result<Vec<ProcessEntry>>;

    /// Ask a process to terminate (SIGTERM). Never escalates or waits.
    fn terminate(&self, pid: u32) -> Result<Termination>;
}

/// Process table backed by `sysinfo`.
#[derive(Debug, Default)]
pub struct SystemProcessTable;

impl SystemProcessTable {
    fn refresh_kind() -> ProcessRefreshKind {
        ProcessRefreshKind::nothing()
            .with_exe(UpdateKind::OnlyIfNotSet)
            .with_cmd(UpdateKind::OnlyIfNotSet)
            .with_cwd(UpdateKind::Always)
    }
}

impl ProcessTable for SystemProcessTable {
    #[instrument(skip_all)]
    fn scan(&self) -> Result<Vec<ProcessEntry>> {
        let mut system = System::new();
        system.refresh_processes_specifics(ProcessesToUpdate::All, true, Self::refresh_kind());

        let mut entries: Vec<ProcessEntry> = system
            .processes()
            .iter()
            // On Linux every thread shows up as its own task entry.
            .filter(|(_, process)| process.thread_kind().is_none())
            .map(|(pid, process)| ProcessEntry {
                pid: pid.as_u32(),
                exe: process.exe().map(|p| p.to_path_buf()),
                args: process
                    .cmd()
                    .iter()
                    .skip(1)
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect(),
                cwd: process.cwd().map(|p| p.to_path_buf()),
            })
            .collect();
        entries.sort_by_key(|entry| entry.pid);
        debug!(count = entries.len(), "scanned process table");
        Ok(entries)
    }

    #[instrument(skip(self))]
    fn terminate(&self, pid: u32) -> Result<Termination> {
        let pid = Pid::from_u32(pid);
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing(),
        );
        let Some(process) = system.process(pid) else {
            debug!("process already exited");
            return Ok(Termination::Gone);
        };
        match process.kill_with(Signal::Term) {
            Some(true) => Ok(Termination::Requested),
            Some(false) => {
                warn!("termination signal refused");
                Ok(Termination::Refused)
            }
            None => Err(anyhow!("SIGTERM is not supported on this platform")),
        }
    }
}
