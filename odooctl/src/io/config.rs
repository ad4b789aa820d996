//! odooctl configuration stored under `<config dir>/odooctl/config.toml`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "config.toml";

/// PyCharm launcher script installed by JetBrains Toolbox, relative to home.
const PYCHARM_TOOLBOX_SCRIPT: &str = ".local/share/JetBrains/Toolbox/scripts/pycharm";

/// odooctl configuration (TOML).
///
/// Edited by hand. Missing fields fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct OdooctlConfig {
    pub workspaces: Vec<WorkspaceConfig>,
    pub editor: EditorConfig,
    pub picker: PickerConfig,
}

/// One `[[workspaces]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceConfig {
    pub name: String,
    /// Checkout directory. A leading `~/` is expanded to the home directory.
    pub path: PathBuf,
    /// Odoo series, e.g. `"17.0"`.
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor binary. Defaults to the Toolbox PyCharm script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PickerConfig {
    /// Picker program followed by extra arguments; `-l <lines>` is appended.
    pub command: Vec<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            command: vec!["bemenu".to_string()],
        }
    }
}

impl EditorConfig {
    /// Configured editor binary, or the Toolbox PyCharm script under home.
    pub fn resolve_bin(&self) -> Result<PathBuf> {
        match &self.bin {
            Some(bin) => expand_home(bin),
            None => Ok(home_dir()?.join(PYCHARM_TOOLBOX_SCRIPT)),
        }
    }
}

impl OdooctlConfig {
    pub fn validate(&self) -> Result<()> {
        let mut paths = HashSet::new();
        for workspace in &self.workspaces {
            if workspace.name.trim().is_empty() {
                return Err(anyhow!("workspace name must be non-empty"));
            }
            if workspace.version.trim().is_empty() {
                return Err(anyhow!(
                    "workspace {} must declare a version",
                    workspace.name
                ));
            }
            if !paths.insert(&workspace.path) {
                return Err(anyhow!(
                    "duplicate workspace path {}",
                    workspace.path.display()
                ));
            }
        }
        if self.picker.command.is_empty() || self.picker.command[0].trim().is_empty() {
            return Err(anyhow!("picker.command must be a non-empty array"));
        }
        Ok(())
    }
}

/// Default config location (`$XDG_CONFIG_HOME/odooctl/config.toml` on Linux).
pub fn default_config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "odooctl")
        .ok_or_else(|| anyhow!("cannot determine config directory"))?;
    Ok(dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `OdooctlConfig::default()`.
pub fn load_config(path: &Path) -> Result<OdooctlConfig> {
    if !path.exists() {
        let cfg = OdooctlConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: OdooctlConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &OdooctlConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

fn home_dir() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| anyhow!("cannot determine home directory"))
}

/// Expand a leading `~/` (or a bare `~`) to the home directory.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    if path == Path::new("~") {
        return home_dir();
    }
    match path.strip_prefix("~") {
        Ok(rest) => Ok(home_dir()?.join(rest)),
        Err(_) => Ok(path.to_path_buf()),
    }
}
