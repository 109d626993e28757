pub mod commands;
pub mod core;
pub mod format;
pub mod output;
mod shell;
pub mod table;

pub use self::core::{CliMode, CommandError, ShellContext};
pub use shell::run_cli;
