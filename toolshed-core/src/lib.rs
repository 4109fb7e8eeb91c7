pub mod batch;
pub mod config;
pub mod console;
pub mod constants;
pub mod git;
pub mod menu;
pub mod paths;
pub mod pdf;
pub mod pip;
pub mod process;
pub mod session;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types at crate root
pub use config::Config;
pub use console::{Choice, Console, InputClosed, Styles};
pub use menu::{Menu, MenuEntry, MenuState, Selection};
pub use process::{CommandLine, CommandResult, CommandRunner, SystemRunner};
pub use session::{Reporting, Session, UserError};
