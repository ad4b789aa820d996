//! Picker capability: an external selection binary such as `bemenu`.

use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tracing::instrument;

use crate::io::process::run_captured;

/// Result of one picker run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOutput {
    /// Exit code; `None` when the picker was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
}

impl PickerOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Abstraction over interactive pickers.
pub trait Picker {
    /// Show `input` (one choice per line) with `lines` visible rows.
    fn pick(&self, lines: usize, input: &[u8]) -> Result<PickerOutput>;
}

/// Picker spawned from a configured command line, with `-l <lines>` appended.
#[derive(Debug, Clone)]
pub struct CommandPicker {
    program: String,
    args: Vec<String>,
}

impl CommandPicker {
    pub fn from_command(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| anyhow!("picker command is empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Default for CommandPicker {
    fn default() -> Self {
        Self {
            program: "bemenu".to_string(),
            args: Vec::new(),
        }
    }
}

impl Picker for CommandPicker {
    #[instrument(skip_all, fields(program = %self.program, lines = lines))]
    fn pick(&self, lines: usize, input: &[u8]) -> Result<PickerOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg("-l").arg(lines.to_string());
        let output =
            run_captured(cmd, input).with_context(|| format!("run picker {}", self.program))?;
        Ok(PickerOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_command_splits_program_and_args() {
        let picker = CommandPicker::from_command(&["fuzzel".to_string(), "--dmenu".to_string()])
            .expect("picker");
        assert_eq!(picker.program, "fuzzel");
        assert_eq!(picker.args, vec!["--dmenu"]);
    }

    #[test]
    fn from_command_rejects_empty() {
        assert!(CommandPicker::from_command(&[]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn passes_line_count_after_configured_args() {
        // sh -c '<script>' binds the trailing arguments to $0, $1, ...
        let picker = CommandPicker::from_command(&[
            "sh".to_string(),
            "-c".to_string(),
            "cat >/dev/null; echo \"$0 $1\"".to_string(),
        ])
        .expect("picker");
        let output = picker.pick(7, b"a\nb\n").expect("pick");
        assert!(output.succeeded());
        assert_eq!(output.stdout, "-l 7\n");
    }
}
