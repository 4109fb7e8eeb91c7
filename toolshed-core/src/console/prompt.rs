use super::Console;
use crate::constants::CANCEL_TOKEN;
use anyhow::{Context, Result};
use std::fmt;

/// Standard input reached end-of-file while a prompt was waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClosed;

impl fmt::Display for InputClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Input closed. Exiting.")
    }
}

impl std::error::Error for InputClosed {}

/// A selectable entry: what the user sees, and the value recovered after selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl Choice<String> {
    /// A choice whose label is also its value, e.g. a branch name.
    pub fn named(name: &str) -> Self {
        Self::new(name, name.to_string())
    }
}

/// Classification of one line typed at a selection prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionInput {
    Cancel,
    /// Zero-based index into the list.
    Index(usize),
    OutOfRange,
    NotANumber,
}

pub fn parse_selection(input: &str, len: usize) -> SelectionInput {
    let input = input.trim();
    if input.eq_ignore_ascii_case(CANCEL_TOKEN) {
        return SelectionInput::Cancel;
    }
    let Ok(number) = input.parse::<i64>() else {
        return SelectionInput::NotANumber;
    };
    match usize::try_from(number) {
        Ok(n) if (1..=len).contains(&n) => SelectionInput::Index(n - 1),
        _ => SelectionInput::OutOfRange,
    }
}

impl Console {
    /// Print `prompt` and read one trimmed line.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.write_prompt(prompt);
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    /// Ask a yes/no question until it gets a yes or a no.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        loop {
            let answer = self.read_line(&format!("{prompt} (y/n): "))?;
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.warning("Please answer 'y' or 'n'."),
            }
        }
    }

    /// Show a numbered list and wait for a valid 1-based choice or a cancel.
    ///
    /// An empty list returns `None` without reading input.
    pub fn select<'a, T>(&mut self, items: &'a [Choice<T>], prompt: &str) -> Result<Option<&'a T>> {
        if items.is_empty() {
            self.warning("No items to select.");
            return Ok(None);
        }

        self.heading(prompt);
        for (i, item) in items.iter().enumerate() {
            self.line(&format!("  [{}] {}", i + 1, item.label));
        }

        loop {
            let input = self.read_line(&format!("Enter number (or '{CANCEL_TOKEN}' to cancel): "))?;
            match parse_selection(&input, items.len()) {
                SelectionInput::Cancel => return Ok(None),
                SelectionInput::Index(i) => return Ok(Some(&items[i].value)),
                SelectionInput::OutOfRange => self.warning("Invalid number. Please try again."),
                SelectionInput::NotANumber => self.warning("Invalid input. Please enter a number."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::scripted_console;

    fn branches() -> Vec<Choice<String>> {
        ["main", "feat/a", "fix/b"]
            .into_iter()
            .map(Choice::named)
            .collect()
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("c", 3), SelectionInput::Cancel);
        assert_eq!(parse_selection(" C ", 3), SelectionInput::Cancel);
        assert_eq!(parse_selection("1", 3), SelectionInput::Index(0));
        assert_eq!(parse_selection("3", 3), SelectionInput::Index(2));
        assert_eq!(parse_selection("+2", 3), SelectionInput::Index(1));
        assert_eq!(parse_selection("0", 3), SelectionInput::OutOfRange);
        assert_eq!(parse_selection("4", 3), SelectionInput::OutOfRange);
        assert_eq!(parse_selection("-1", 3), SelectionInput::OutOfRange);
        assert_eq!(parse_selection("two", 3), SelectionInput::NotANumber);
        assert_eq!(parse_selection("", 3), SelectionInput::NotANumber);
        assert_eq!(parse_selection("1.5", 3), SelectionInput::NotANumber);
    }

    #[test]
    fn test_select_empty_list_returns_none_without_reading() {
        let (mut console, out) = scripted_console("");
        let items: Vec<Choice<String>> = Vec::new();
        // No input is scripted, so any read would fail with InputClosed
        let selected = console.select(&items, "Pick one:").unwrap();
        assert!(selected.is_none());
        assert!(out.contents().contains("No items to select."));
        assert!(!out.contents().contains("Enter number"));
    }

    #[test]
    fn test_select_returns_chosen_value() {
        let (mut console, out) = scripted_console("2\n");
        let items = branches();
        let selected = console.select(&items, "Pick one:").unwrap();
        assert_eq!(selected.map(String::as_str), Some("feat/a"));
        let output = out.contents();
        assert!(output.contains("Pick one:"));
        assert!(output.contains("  [1] main"));
        assert!(output.contains("  [3] fix/b"));
    }

    #[test]
    fn test_select_reprompts_until_valid() {
        let (mut console, out) = scripted_console("abc\n0\n9\n\n3\n");
        let items = branches();
        let selected = console.select(&items, "Pick one:").unwrap();
        assert_eq!(selected.map(String::as_str), Some("fix/b"));
        let output = out.contents();
        assert_eq!(output.matches("Invalid input. Please enter a number.").count(), 2);
        assert_eq!(output.matches("Invalid number. Please try again.").count(), 2);
        assert_eq!(output.matches("Enter number").count(), 5);
    }

    #[test]
    fn test_select_cancel_returns_none() {
        let (mut console, _out) = scripted_console("C\n");
        let items = branches();
        assert!(console.select(&items, "Pick one:").unwrap().is_none());
    }

    #[test]
    fn test_select_eof_is_input_closed() {
        let (mut console, _out) = scripted_console("7\n");
        let items = branches();
        let err = console.select(&items, "Pick one:").unwrap_err();
        assert!(err.downcast_ref::<InputClosed>().is_some());
    }

    #[test]
    fn test_confirm_accepts_yes_and_no() {
        let (mut console, _out) = scripted_console("Y\nno\n");
        assert!(console.confirm("Delete?").unwrap());
        assert!(!console.confirm("Delete?").unwrap());
    }

    #[test]
    fn test_confirm_reprompts_on_garbage() {
        let (mut console, out) = scripted_console("maybe\n\nyes\n");
        assert!(console.confirm("Delete?").unwrap());
        assert_eq!(out.contents().matches("Please answer 'y' or 'n'.").count(), 2);
        assert_eq!(out.contents().matches("Delete? (y/n): ").count(), 3);
    }

    #[test]
    fn test_read_line_trims() {
        let (mut console, out) = scripted_console("  wip message \n");
        assert_eq!(console.read_line("Message: ").unwrap(), "wip message");
        assert_eq!(out.contents(), "Message: ");
    }
}
