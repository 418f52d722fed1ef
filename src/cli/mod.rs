//! Interactive and scripted terminal shell over [`ReportService`](crate::ReportService).

mod commands;
pub mod core;
mod help;
pub mod io;
pub mod output;
mod registry;
mod shell;
mod shell_context;

pub use self::core::{CliError, CommandError};
pub use shell::{run_cli, SCRIPT_ENV};
pub use shell_context::{CliMode, ShellContext};
