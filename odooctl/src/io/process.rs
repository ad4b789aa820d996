//! Helpers for running child processes.
//!
//! Neither helper applies a timeout: a picker or editor that never exits
//! blocks the caller.

use std::io::{ErrorKind, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument};

/// Captured child process output. Stderr is always discarded.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
}

/// Run a command feeding `stdin` and capturing stdout in full.
///
/// Stdout is drained on a helper thread while stdin is written, so a child
/// that emits output before consuming all of its input cannot deadlock us.
/// A child that closes stdin early is not an error; its exit status decides.
#[instrument(skip_all, fields(program = ?cmd.get_program(), stdin_bytes = stdin.len()))]
pub fn run_captured(mut cmd: Command, stdin: &[u8]) -> Result<CommandOutput> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stdout_handle = thread::spawn(move || read_stream(stdout));

    let mut child_stdin = child
        .stdin
        .take()
        .ok_or_else(|| anyhow!("stdin was not piped"))?;
    match child_stdin.write_all(stdin) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("child closed stdin early");
        }
        Err(e) => return Err(e).context("write stdin"),
    }
    drop(child_stdin);

    let status = child.wait().context("wait for command")?;
    let stdout = match stdout_handle.join() {
        Ok(result) => result.context("join stdout")?,
        Err(_) => return Err(anyhow!("output reader thread panicked")),
    };

    debug!(exit_code = ?status.code(), stdout_bytes = stdout.len(), "command finished");
    Ok(CommandOutput { status, stdout })
}

/// Start a command with all standard streams detached.
///
/// Returns once the process has started, or after it exits when `wait` is set.
/// The exit status is not inspected.
#[instrument(skip_all, fields(program = ?cmd.get_program(), wait = wait))]
pub fn spawn_detached(mut cmd: Command, wait: bool) -> Result<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let mut child = cmd.spawn().context("spawn command")?;
    debug!(pid = child.id(), "child started");
    if wait {
        let status = child.wait().context("wait for command")?;
        debug!(exit_code = ?status.code(), "child exited");
    }
    Ok(())
}

fn read_stream<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).context("read output")?;
    Ok(buf)
}
