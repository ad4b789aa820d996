//! CLI tests spawning the odooctl binary against a temporary config.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use odooctl::exit_codes;
use odooctl::io::config::load_config;

fn odooctl(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_odooctl"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("run odooctl")
}

#[test]
fn init_writes_loadable_default_config() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = temp.path().join("odooctl").join("config.toml");

    let output = odooctl(&config, &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let cfg = load_config(&config).expect("load written config");
    assert_eq!(cfg.picker.command, vec!["bemenu"]);

    fs::write(&config, "[picker]\ncommand = [\"fuzzel\"]\n").expect("edit config");
    let output = odooctl(&config, &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let cfg = load_config(&config).expect("load kept config");
    assert_eq!(cfg.picker.command, vec!["fuzzel"]);
}

#[test]
fn workspaces_lists_configured_entries() {
    let temp = tempfile::tempdir().expect("tempdir");
    let checkout = temp.path().join("saas-17.2");
    fs::create_dir(&checkout).expect("mkdir");
    let config = temp.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "[[workspaces]]\nname = \"saas\"\npath = \"{}\"\nversion = \"17.2\"\n",
            checkout.display()
        ),
    )
    .expect("write config");

    let output = odooctl(&config, &["workspaces"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let canonical = fs::canonicalize(&checkout).expect("canonicalize");
    assert_eq!(stdout, format!("saas\t17.2\t{}\n", canonical.display()));
}

#[test]
fn invalid_config_exits_with_invalid_code() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = temp.path().join("config.toml");
    fs::write(&config, "[picker]\ncommand = []\n").expect("write config");

    let output = odooctl(&config, &["workspaces"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("picker.command"));
}

#[cfg(unix)]
#[test]
fn open_waits_for_editor() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = temp.path().join("config.toml");
    fs::write(&config, "[editor]\nbin = \"true\"\n").expect("write config");

    let output = odooctl(&config, &["open", "models/sale.py", "--line", "4", "--wait"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
}

#[test]
fn open_reports_missing_editor() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = temp.path().join("config.toml");
    fs::write(&config, "[editor]\nbin = \"/nonexistent/odooctl/pycharm\"\n").expect("write config");

    let output = odooctl(&config, &["open", "models/sale.py"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("launch editor"));
}
