//! Core CLI loop, dispatch, and shell context helpers.

use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::services::{Dashboard, DashboardService, TransactionService},
    domain::{Ledger, Transaction},
    errors::LedgerError,
    storage::{CsvLedgerStore, LedgerStore},
};

pub use crate::cli::shell_context::{CliMode, ShellContext};
pub use crate::errors::CliError;

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use super::ui::formatting::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    /// Builds a context whose configuration and default ledger live under
    /// `config_manager`'s base directory.
    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let store = open_store(&config, &config_manager);
        Self::with_parts(mode, config_manager, config, store)
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        store: Box<dyn LedgerStore>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::apply_config(&config);

        let ledger = store.load()?;
        tracing::info!(
            store = %store.describe(),
            transactions = ledger.len(),
            "ledger opened"
        );

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            store,
            ledger,
            running: true,
        })
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.all_names()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("finance [{}]> ", self.ledger.len())
    }

    /// Re-reads the ledger so every view reflects what is on disk.
    pub(crate) fn reload(&mut self) -> Result<&Ledger, CommandError> {
        self.ledger = self.store.load()?;
        Ok(&self.ledger)
    }

    pub(crate) fn dashboard(&mut self) -> Result<Dashboard, CommandError> {
        let ledger = self.reload()?;
        Ok(DashboardService::render(ledger))
    }

    /// Appends `transaction` to the freshly loaded ledger and persists it.
    pub(crate) fn record(&mut self, transaction: Transaction) -> CommandResult {
        self.reload()?;
        self.ledger = TransactionService::add(self.store.as_ref(), &self.ledger, transaction)?;
        Ok(())
    }

    pub(crate) fn record_fields(
        &mut self,
        date: &str,
        category: &str,
        kind: &str,
        amount: &str,
    ) -> CommandResult {
        self.reload()?;
        self.ledger = TransactionService::add_from_fields(
            self.store.as_ref(),
            &self.ledger,
            date,
            category,
            kind,
            amount,
        )?;
        Ok(())
    }

    pub(crate) fn show_config(&self) -> CommandResult {
        output::section("Configuration");
        let entries = self.config.entries(self.config_manager.base_dir());
        Formatter::new().print_two_column(&entries);
        output::info(format!(
            "  (stored in {})",
            self.config_manager.path().display()
        ));
        Ok(())
    }

    pub(crate) fn set_config_value(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        updated.set_value(key, value)?;
        self.apply_config(updated)?;
        output::success(format!("Configuration updated: {} = {}", key, value));
        Ok(())
    }

    pub(crate) fn reset_config(&mut self) -> CommandResult {
        self.apply_config(Config::default())?;
        output::success("Configuration reset to defaults.");
        Ok(())
    }

    /// Saves `updated` and switches to its data file. A data file that fails to
    /// load leaves the saved config and the open store as they were.
    fn apply_config(&mut self, updated: Config) -> CommandResult {
        let base = self.config_manager.base_dir();
        let relocated = if updated.resolve_data_file(base) != self.config.resolve_data_file(base)
        {
            let store = open_store(&updated, &self.config_manager);
            let ledger = store.load().map_err(|err| {
                tracing::warn!(store = %store.describe(), error = %err, "ledger file rejected");
                err
            })?;
            Some((store, ledger))
        } else {
            None
        };

        self.config_manager.save(&updated)?;
        self.config = updated;
        output::apply_config(&self.config);

        if let Some((store, ledger)) = relocated {
            self.store = store;
            self.ledger = ledger;
            tracing::info!(store = %self.store.describe(), "switched ledger file");
            output::info(format!(
                "Now using {} ({} transactions).",
                self.store.describe(),
                self.ledger.len()
            ));
        }
        Ok(())
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

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest_match(input, &self.registry.all_names()) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(LedgerError::InvalidInput(message)) => {
                self.print_error(&message);
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        output::error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        output::hint(message);
    }
}

fn open_store(config: &Config, config_manager: &ConfigManager) -> Box<dyn LedgerStore> {
    Box::new(CsvLedgerStore::new(
        config.resolve_data_file(config_manager.base_dir()),
    ))
}

/// Closest known name within edit distance 3, if any.
pub(crate) fn closest_match<'a>(input: &str, names: &[&'a str]) -> Option<&'a str> {
    let needle = input.to_lowercase();
    names
        .iter()
        .map(|name| (levenshtein(name, &needle), *name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name)
}

#[derive(Debug, thiserror::Error)]
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

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Ledger(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Ledger(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    base: &std::path::Path,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let manager = ConfigManager::with_base_dir(base.to_path_buf())?;
    let mut app = ShellContext::with_config_manager(CliMode::Script, manager)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}
