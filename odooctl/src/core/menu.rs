//! Mapping between menu choices and the lines shown in the picker.

use std::collections::HashMap;

/// Rendered menu lines and the choice each line selects.
///
/// When two choices render to the same line, the later choice wins and the
/// line is listed once, at the position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceIndex {
    lines: Vec<String>,
    by_line: HashMap<String, usize>,
}

impl ChoiceIndex {
    pub fn build<T>(choices: &[T], render: impl Fn(&T) -> String) -> Self {
        let mut index = Self::default();
        for (position, choice) in choices.iter().enumerate() {
            let line = render(choice);
            if index.by_line.insert(line.clone(), position).is_none() {
                index.lines.push(line);
            }
        }
        index
    }

    /// Distinct rendered lines, in first-occurrence order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line-delimited picker input.
    pub fn to_input(&self) -> Vec<u8> {
        let mut buf = String::new();
        for line in &self.lines {
            buf.push_str(line);
            buf.push('\n');
        }
        buf.into_bytes()
    }

    /// Position of the choice selected by the picker's stdout, if any.
    ///
    /// Only the first output line counts, trimmed of surrounding whitespace.
    pub fn resolve(&self, stdout: &str) -> Option<usize> {
        let first = stdout.lines().next()?;
        self.by_line.get(first.trim()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_follow_choice_order() {
        let index = ChoiceIndex::build(&["b", "a", "c"], |s| s.to_string());
        assert_eq!(index.lines(), ["b", "a", "c"]);
        assert_eq!(index.to_input(), b"b\na\nc\n");
    }

    #[test]
    fn duplicate_rendering_keeps_later_choice() {
        let choices = [(1, "dup"), (2, "other"), (3, "dup")];
        let index = ChoiceIndex::build(&choices, |(_, label)| label.to_string());
        assert_eq!(index.lines(), ["dup", "other"]);
        assert_eq!(index.resolve("dup\n"), Some(2));
    }

    #[test]
    fn resolve_uses_first_trimmed_line() {
        let index = ChoiceIndex::build(&["alpha", "beta"], |s| s.to_string());
        assert_eq!(index.resolve("  beta \nalpha\n"), Some(1));
    }

    #[test]
    fn resolve_unknown_or_empty_output_is_none() {
        let index = ChoiceIndex::build(&["alpha", "beta"], |s| s.to_string());
        assert_eq!(index.resolve("gamma\n"), None);
        assert_eq!(index.resolve(""), None);
    }
}
