mod prompt;
mod styles;

pub use prompt::{Choice, InputClosed, SelectionInput, parse_selection};
pub use styles::{Level, Styles};

use crate::constants::RULE_WIDTH;
use std::io::{self, BufRead, Write};

/// Line-oriented terminal: status output plus blocking prompts.
///
/// Output helpers never fail; a broken stdout only loses the message.
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
    styles: Styles,
}

impl Console {
    pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>, styles: Styles) -> Self {
        Self {
            input,
            output,
            styles,
        }
    }

    pub fn stdio(styles: Styles) -> Self {
        Self::new(Box::new(io::stdin().lock()), Box::new(io::stdout()), styles)
    }

    pub fn info(&mut self, message: &str) {
        self.status(Level::Info, message);
    }

    pub fn success(&mut self, message: &str) {
        self.status(Level::Success, message);
    }

    pub fn warning(&mut self, message: &str) {
        self.status(Level::Warning, message);
    }

    pub fn error(&mut self, message: &str) {
        self.status(Level::Error, message);
    }

    fn status(&mut self, level: Level, message: &str) {
        let text = format!("{}  {message}", level.marker());
        let styled = self.styles.paint_level(level, &text);
        self.write_line(&styled);
    }

    /// Print `text` verbatim (external tool output keeps its own colors).
    pub fn line(&mut self, text: &str) {
        self.write_line(text);
    }

    pub fn blank(&mut self) {
        self.write_line("");
    }

    /// Bold title in the main title color.
    pub fn heading(&mut self, text: &str) {
        let styled = self.styles.paint_title(text);
        self.write_line(&styled);
    }

    /// Title for nested menus, in the accent color.
    pub fn subheading(&mut self, text: &str) {
        let styled = self.styles.paint_accent(text);
        self.write_line(&styled);
    }

    pub fn rule(&mut self) {
        self.write_line(&"-".repeat(RULE_WIDTH));
    }

    /// Print `- item` lines, indented under a preceding message.
    pub fn bullets<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self.write_line(&format!("  - {}", item.as_ref()));
        }
    }

    fn write_line(&mut self, text: &str) {
        let _ = writeln!(self.output, "{text}");
        let _ = self.output.flush();
    }

    fn write_prompt(&mut self, text: &str) {
        let _ = write!(self.output, "{text}");
        let _ = self.output.flush();
    }
}
