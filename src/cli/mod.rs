//! Terminal front end over [`crate::core::BillStore`].

pub mod commands;
pub mod core;
pub mod io;
pub mod output;
pub mod registry;
pub mod render;
pub mod shell;
pub mod shell_context;

pub use self::core::{CliError, CommandError};
pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
