//! Discovery and termination of running Odoo servers.

use std::fs;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument, warn};

use crate::core::cmdline::{is_server_process, parse_server_args};
use crate::core::instance::Instance;
use crate::io::process_table::{ProcessTable, Termination};
use crate::io::workspaces::WorkspaceSource;

/// List running Odoo servers.
///
/// A server without `--database=` is skipped. A server whose working directory
/// matches no workspace fails the whole call.
#[instrument(skip_all)]
pub fn list_instances<P, W>(table: &P, workspaces: &W) -> Result<Vec<Instance>>
where
    P: ProcessTable + ?Sized,
    W: WorkspaceSource + ?Sized,
{
    let known = workspaces.list().context("list workspaces")?;
    let entries = table.scan().context("scan process table")?;

    let mut instances = Vec::new();
    for entry in entries {
        let exe = entry.exe.as_deref().map(|p| p.to_string_lossy());
        if !is_server_process(exe.as_deref(), &entry.args) {
            continue;
        }
        let Some(server) = parse_server_args(&entry.args)
            .with_context(|| format!("parse command line of pid {}", entry.pid))?
        else {
            debug!(pid = entry.pid, "odoo process without database, skipping");
            continue;
        };

        let cwd = entry
            .cwd
            .as_deref()
            .ok_or_else(|| anyhow!("working directory of pid {} is unknown", entry.pid))?;
        let cwd = fs::canonicalize(cwd).with_context(|| {
            format!(
                "resolve working directory {} of pid {}",
                cwd.display(),
                entry.pid
            )
        })?;
        let workspace = known
            .iter()
            .find(|workspace| workspace.path == cwd)
            .ok_or_else(|| {
                anyhow!(
                    "no workspace matches {} (pid {}, database {})",
                    cwd.display(),
                    entry.pid,
                    server.database
                )
            })?;

        debug!(
            pid = entry.pid,
            database = %server.database,
            port = server.port,
            workspace = %workspace.name,
            "found instance"
        );
        instances.push(Instance {
            pid: entry.pid,
            port: server.port,
            database: server.database,
            workspace: workspace.clone(),
        });
    }
    Ok(instances)
}

/// Request termination of every running Odoo server.
///
/// Does not wait for the processes to exit. Returns how many termination
/// requests were delivered.
#[instrument(skip_all)]
pub fn kill_all<P, W>(table: &P, workspaces: &W) -> Result<usize>
where
    P: ProcessTable + ?Sized,
    W: WorkspaceSource + ?Sized,
{
    let mut signalled = 0;
    for instance in list_instances(table, workspaces)? {
        match table
            .terminate(instance.pid)
            .with_context(|| format!("terminate pid {}", instance.pid))?
        {
            Termination::Requested => {
                info!(pid = instance.pid, database = %instance.database, "termination requested");
                signalled += 1;
            }
            Termination::Gone => debug!(pid = instance.pid, "already exited"),
            Termination::Refused => {
                warn!(pid = instance.pid, database = %instance.database, "termination refused");
            }
        }
    }
    Ok(signalled)
}
