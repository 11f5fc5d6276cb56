//! Terminal front end: argument parsing, wizard prompts and the browser.

pub mod args;
pub mod browser_view;
pub mod commands;
pub mod core;
pub mod forms;
pub mod io;
pub mod output;
pub mod ui;

pub use args::Cli;
pub use commands::run;
pub use core::{CommandContext, CommandError, CommandResult};
