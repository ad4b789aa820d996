//! Interactive selection through an external picker.

use std::fmt::Display;

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::core::menu::ChoiceIndex;
use crate::io::picker::Picker;

/// Let the user pick one of `choices`, shown as `render(choice)`.
///
/// `lines` is the number of visible rows (defaults to the number of choices).
/// No picker is spawned for zero or one choice. A non-zero picker exit, empty
/// output or an unknown line all yield `None`. Choices that render to the same
/// string collapse into one line selecting the later choice.
#[instrument(skip_all, fields(choices = choices.len(), lines = ?lines))]
pub fn menu<T, P, F>(
    picker: &P,
    choices: Vec<T>,
    lines: Option<usize>,
    render: F,
) -> Result<Option<T>>
where
    P: Picker + ?Sized,
    F: Fn(&T) -> String,
{
    if choices.len() <= 1 {
        return Ok(choices.into_iter().next());
    }

    let index = ChoiceIndex::build(&choices, render);
    let lines = lines.unwrap_or(choices.len());
    let output = picker
        .pick(lines, &index.to_input())
        .context("run picker")?;

    if !output.succeeded() {
        debug!(exit_code = ?output.exit_code, "picker cancelled");
        return Ok(None);
    }
    let Some(position) = index.resolve(&output.stdout) else {
        debug!("picker output matched no choice");
        return Ok(None);
    };
    Ok(choices.into_iter().nth(position))
}

/// [`menu`] rendering each choice with its `Display` implementation.
pub fn menu_display<T, P>(picker: &P, choices: Vec<T>, lines: Option<usize>) -> Result<Option<T>>
where
    T: Display,
    P: Picker + ?Sized,
{
    menu(picker, choices, lines, |choice| choice.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedPicker;

    #[test]
    fn empty_choices_skip_picker() {
        let picker = ScriptedPicker::selecting("anything");
        let selected = menu_display(&picker, Vec::<String>::new(), None).expect("menu");
        assert_eq!(selected, None);
        assert!(picker.calls().is_empty());
    }

    #[test]
    fn single_choice_skips_picker() {
        let picker = ScriptedPicker::selecting("anything");
        let selected = menu_display(&picker, vec!["only"], None).expect("menu");
        assert_eq!(selected, Some("only"));
        assert!(picker.calls().is_empty());
    }

    #[test]
    fn returns_choice_matching_picker_output() {
        let picker = ScriptedPicker::selecting("second\n");
        let selected = menu_display(&picker, vec!["first", "second", "third"], None).expect("menu");
        assert_eq!(selected, Some("second"));

        let calls = picker.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].lines, 3);
        assert_eq!(calls[0].input, "first\nsecond\nthird\n");
    }

    #[test]
    fn renders_with_custom_function() {
        let picker = ScriptedPicker::selecting("  #2 \n");
        let choices = vec![10, 20, 30];
        let selected = menu(&picker, choices, Some(5), |n| format!("#{}", n / 10)).expect("menu");
        assert_eq!(selected, Some(20));
        assert_eq!(picker.calls()[0].lines, 5);
    }

    #[test]
    fn non_zero_exit_yields_none() {
        let picker = ScriptedPicker::new(Some(1), "second\n");
        let selected = menu_display(&picker, vec!["first", "second"], None).expect("menu");
        assert_eq!(selected, None);
    }

    #[test]
    fn killed_picker_yields_none() {
        let picker = ScriptedPicker::new(None, "");
        let selected = menu_display(&picker, vec!["first", "second"], None).expect("menu");
        assert_eq!(selected, None);
    }

    #[test]
    fn unmatched_or_empty_output_yields_none() {
        let picker = ScriptedPicker::selecting("fourth\n");
        assert_eq!(
            menu_display(&picker, vec!["first", "second"], None).expect("menu"),
            None
        );
        let picker = ScriptedPicker::selecting("");
        assert_eq!(
            menu_display(&picker, vec!["first", "second"], None).expect("menu"),
            None
        );
    }

    #[test]
    fn duplicate_renderings_select_later_choice() {
        let picker = ScriptedPicker::selecting("same");
        let choices = vec![("same", 1), ("other", 2), ("same", 3)];
        let selected = menu(&picker, choices, None, |(label, _)| label.to_string()).expect("menu");
        assert_eq!(selected, Some(("same", 3)));
        assert_eq!(picker.calls()[0].input, "same\nother\n");
    }

    #[test]
    fn picker_failure_propagates() {
        let picker = ScriptedPicker::failing("spawn picker bemenu");
        let err = menu_display(&picker, vec!["a", "b"], None).expect_err("failure");
        assert!(format!("{err:#}").contains("spawn picker bemenu"));
    }
}
