//! Shell construction, dispatch and error reporting.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use tracing::warn;

use crate::{
    config::ConfigManager, core::ReportService, core::utils::app_data_dir, errors::LedgerError,
};

use super::commands;
use super::io as cli_io;
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Line editor failed: {0}")]
    Readline(#[from] ReadlineError),
}

/// Failures of a single command; reported and the shell carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Ledger(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Core(LedgerError::Io(err))
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, app_data_dir())
    }

    /// Builds a shell whose config and default data file live under `base`.
    pub fn with_base_dir(mode: CliMode, base: impl Into<PathBuf>) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base);
        let config = config_manager.load()?;
        if !config_manager.path().exists() {
            if let Err(err) = config_manager.save(&config) {
                warn!(
                    path = %config_manager.path().display(),
                    error = %err,
                    "could not write default config"
                );
            }
        }

        let service = ReportService::from_config(&config, config_manager.base_dir())?;
        if let Some(copy) = service.recovered_from() {
            cli_io::print_warning(format!(
                "The data file was not fully readable and was copied to {}. Unreadable records were left out.",
                copy.display()
            ));
        }

        Ok(ShellContext {
            mode,
            registry,
            service,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min();

        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                cli_io::print_hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit the budget shell?", false)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(err) if err.is_validation() => {
                cli_io::print_error(err);
                Ok(())
            }
            other => {
                cli_io::print_error(&other);
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&first.to_lowercase(), first, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::RecordKind;
    use rust_decimal_macros::dec;
    use tempfile::{tempdir, TempDir};

    fn shell() -> (TempDir, ShellContext) {
        let temp = tempdir().expect("temp dir");
        let context = ShellContext::with_base_dir(CliMode::Script, temp.path()).expect("shell");
        (temp, context)
    }

    fn run(context: &mut ShellContext, lines: &[&str]) -> Vec<Result<LoopControl, CommandError>> {
        lines.iter().map(|line| context.process_line(line)).collect()
    }

    #[test]
    fn startup_writes_a_default_config() {
        let (temp, _context) = shell();
        assert!(temp.path().join("config.json").exists());
    }

    #[test]
    fn entry_commands_reach_the_service() {
        let (_temp, mut context) = shell();
        let results = run(
            &mut context,
            &[
                "income 5000 Salary Maosh 2024-01-01",
                "expense 1200 Food Ovqat 2024-01-02",
            ],
        );
        assert!(results.iter().all(Result::is_ok));

        let totals = context.service.totals();
        assert_eq!(totals.balance, dec!(3800));
        assert_eq!(context.service.spend_ratio(), dec!(24));
    }

    #[test]
    fn omitted_category_uses_the_first_suggestion() {
        let (_temp, mut context) = shell();
        context.process_line("expense 12").unwrap();
        let history = context.service.history();
        assert_eq!(history[0].category, "Food");
        assert_eq!(history[0].kind, RecordKind::Expense);
    }

    #[test]
    fn bad_amount_is_a_validation_error() {
        let (_temp, mut context) = shell();
        let err = context.process_line("income lots").expect_err("rejected");
        assert!(matches!(err, CommandError::Ledger(ref inner) if inner.is_validation()));
        assert_eq!(context.service.record_count(), 0);
        context.report_error(err).expect("reported, not fatal");
    }

    #[test]
    fn exit_and_quit_stop_the_loop() {
        let (_temp, mut context) = shell();
        assert_eq!(context.process_line("quit").unwrap(), LoopControl::Exit);
        assert_eq!(context.process_line("EXIT").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn unknown_commands_continue() {
        let (_temp, mut context) = shell();
        assert_eq!(context.process_line("balanse").unwrap(), LoopControl::Continue);
    }
}
