use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use odooctl::core::editor::Position;
use odooctl::core::instance::Instance;
use odooctl::exit_codes;
use odooctl::instances::{kill_all, list_instances};
use odooctl::io::config::{OdooctlConfig, default_config_path, load_config, write_config};
use odooctl::io::editor::Editor;
use odooctl::io::picker::CommandPicker;
use odooctl::io::process_table::SystemProcessTable;
use odooctl::io::workspaces::{ConfigWorkspaces, WorkspaceSource};
use odooctl::logging;
use odooctl::menu::menu;

#[derive(Parser)]
#[command(
    name = "odooctl",
    version,
    about = "Manage local Odoo server instances"
)]
struct Cli {
    /// Config file (defaults to `<config dir>/odooctl/config.toml`).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default config file if missing.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// List configured workspaces.
    Workspaces,
    /// List running Odoo servers.
    Instances {
        /// Print a JSON array instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Ask every running Odoo server to terminate.
    Kill,
    /// Open a file in the editor.
    Open {
        path: PathBuf,
        #[arg(long)]
        line: Option<u32>,
        #[arg(long)]
        column: Option<u32>,
        /// Wait for the editor to exit.
        #[arg(long)]
        wait: bool,
    },
    /// Choose a running server with the picker and print its base URL.
    Pick {
        /// Visible picker rows (defaults to the number of servers).
        #[arg(short, long)]
        lines: Option<usize>,
    },
}

/// JSON view of an instance, including its derived URL.
#[derive(Serialize)]
struct InstanceView<'a> {
    pid: u32,
    port: u16,
    database: &'a str,
    workspace: &'a str,
    version: &'a str,
    base_url: String,
}

impl<'a> From<&'a Instance> for InstanceView<'a> {
    fn from(instance: &'a Instance) -> Self {
        Self {
            pid: instance.pid,
            port: instance.port,
            database: &instance.database,
            workspace: &instance.workspace.name,
            version: &instance.workspace.version,
            base_url: instance.base_url(),
        }
    }
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    match cli.command {
        Command::Init { force } => cmd_init(&config_path, force),
        Command::Workspaces => cmd_workspaces(&load_config(&config_path)?),
        Command::Instances { json } => cmd_instances(&load_config(&config_path)?, json),
        Command::Kill => cmd_kill(&load_config(&config_path)?),
        Command::Open {
            path,
            line,
            column,
            wait,
        } => cmd_open(
            &load_config(&config_path)?,
            &path,
            Position { line, column },
            wait,
        ),
        Command::Pick { lines } => cmd_pick(&load_config(&config_path)?, lines),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if path.exists() && !force {
        println!("{} already exists", path.display());
        return Ok(exit_codes::OK);
    }
    write_config(path, &OdooctlConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_workspaces(cfg: &OdooctlConfig) -> Result<i32> {
    for workspace in ConfigWorkspaces::new(cfg.workspaces.clone()).list()? {
        println!(
            "{}\t{}\t{}",
            workspace.name,
            workspace.version,
            workspace.path.display()
        );
    }
    Ok(exit_codes::OK)
}

fn cmd_instances(cfg: &OdooctlConfig, json: bool) -> Result<i32> {
    let instances = discover(cfg)?;
    if json {
        let views: Vec<InstanceView> = instances.iter().map(InstanceView::from).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&views).context("serialize instances")?
        );
        return Ok(exit_codes::OK);
    }
    for instance in &instances {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            instance.pid,
            instance.database,
            instance.port,
            instance.base_url(),
            instance.workspace.name
        );
    }
    Ok(exit_codes::OK)
}

fn cmd_kill(cfg: &OdooctlConfig) -> Result<i32> {
    let workspaces = ConfigWorkspaces::new(cfg.workspaces.clone());
    let signalled = kill_all(&SystemProcessTable, &workspaces)?;
    println!("signalled {signalled} instance(s)");
    Ok(exit_codes::OK)
}

fn cmd_open(cfg: &OdooctlConfig, path: &Path, position: Position, wait: bool) -> Result<i32> {
    let editor = Editor::new(cfg.editor.resolve_bin()?);
    editor.open(path, position, wait)?;
    Ok(exit_codes::OK)
}

fn cmd_pick(cfg: &OdooctlConfig, lines: Option<usize>) -> Result<i32> {
    let picker = CommandPicker::from_command(&cfg.picker.command)?;
    let instances = discover(cfg)?;
    let selected = menu(&picker, instances, lines, |instance| {
        format!(
            "{} [{}] {}",
            instance.database,
            instance.workspace.name,
            instance.base_url()
        )
    })?;
    match selected {
        Some(instance) => {
            println!("{}", instance.base_url());
            Ok(exit_codes::OK)
        }
        None => Ok(exit_codes::NO_SELECTION),
    }
}

fn discover(cfg: &OdooctlConfig) -> Result<Vec<Instance>> {
    let workspaces = ConfigWorkspaces::new(cfg.workspaces.clone());
    list_instances(&SystemProcessTable, &workspaces)
}
