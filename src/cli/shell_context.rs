use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    domain::Ledger,
    storage::LedgerStore,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: Box<dyn LedgerStore>,
    /// Snapshot from the most recent load or append.
    pub ledger: Ledger,
    pub running: bool,
}

impl ShellContext {
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config.currency_symbol
    }
}
