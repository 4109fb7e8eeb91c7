use crate::session::Session;
use anyhow::Result;
use std::marker::PhantomData;

/// A fixed table of menu actions, usually a fieldless enum.
pub trait MenuEntry: Copy + 'static {
    /// Entries in display order.
    const ALL: &'static [Self];

    /// Token the user types (compared case-insensitively).
    fn key(self) -> &'static str;

    fn label(self) -> &'static str;
}

/// What one line of menu input resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<E> {
    Exit,
    Action(E),
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Terminated,
}

pub struct Menu<E> {
    title: &'static str,
    exit_key: &'static str,
    exit_label: &'static str,
    nested: bool,
    separators: bool,
    farewell: Option<&'static str>,
    entries: PhantomData<E>,
}

impl<E: MenuEntry> Menu<E> {
    pub fn new(title: &'static str, exit_key: &'static str, exit_label: &'static str) -> Self {
        Self {
            title,
            exit_key,
            exit_label,
            nested: false,
            separators: false,
            farewell: None,
            entries: PhantomData,
        }
    }

    /// Render the title in the accent color, for menus entered from another menu.
    #[must_use]
    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }

    /// Print a rule before and after every dispatched action.
    #[must_use]
    pub fn with_separators(mut self) -> Self {
        self.separators = true;
        self
    }

    /// Info line printed when the exit token is entered.
    #[must_use]
    pub fn farewell(mut self, message: &'static str) -> Self {
        self.farewell = Some(message);
        self
    }

    pub fn resolve(&self, input: &str) -> Selection<E> {
        let input = input.trim().to_lowercase();
        if input == self.exit_key.to_lowercase() {
            return Selection::Exit;
        }
        E::ALL
            .iter()
            .copied()
            .find(|entry| entry.key().to_lowercase() == input)
            .map_or(Selection::Invalid, Selection::Action)
    }

    fn render(&self, session: &mut Session<'_>) {
        let console = &mut session.console;
        console.blank();
        if self.nested {
            console.subheading(self.title);
        } else {
            console.heading(self.title);
        }
        for entry in E::ALL {
            console.line(&format!("{} : {}", entry.key(), entry.label()));
        }
        console.line(&format!(
            "{} : {}",
            self.exit_key.to_uppercase(),
            self.exit_label
        ));
    }

    /// One iteration: show the menu, read a line, act on it.
    ///
    /// The handler runs to completion before this returns.
    pub fn step<'a, F>(&self, session: &mut Session<'a>, dispatch: &mut F) -> Result<MenuState>
    where
        F: FnMut(&mut Session<'a>, E) -> Result<()>,
    {
        self.render(session);
        let input = session.console.read_line("Enter your choice: ")?;
        match self.resolve(&input) {
            Selection::Exit => {
                if let Some(message) = self.farewell {
                    session.console.info(message);
                }
                log::debug!("leaving menu '{}'", self.title);
                Ok(MenuState::Terminated)
            }
            Selection::Action(entry) => {
                log::debug!("menu '{}': {}", self.title, entry.label());
                if self.separators {
                    session.console.rule();
                }
                dispatch(session, entry)?;
                if self.separators {
                    session.console.rule();
                }
                Ok(MenuState::Running)
            }
            Selection::Invalid => {
                session.console.warning("Invalid choice, please try again.");
                Ok(MenuState::Running)
            }
        }
    }

    /// Loop until the exit token is entered. Handler errors end every menu level.
    pub fn run<'a, F>(&self, session: &mut Session<'a>, mut dispatch: F) -> Result<()>
    where
        F: FnMut(&mut Session<'a>, E) -> Result<()>,
    {
        while self.step(session, &mut dispatch)? == MenuState::Running {}
        Ok(())
    }
}
