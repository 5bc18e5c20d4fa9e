//! Shared runtime state for CLI interactions and command execution.

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::BillStore,
    storage::JsonStorage,
};

use super::{
    commands,
    core::{CliError, CommandError},
    io as cli_io,
    output::{self, OutputPreferences},
    registry::CommandRegistry,
    render,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: BillStore,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
}

impl ShellContext {
    /// Loads configuration and both documents, then registers the commands.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_env();
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });

        let storage = JsonStorage::new(config.storage_paths());
        let store = BillStore::load(Box::new(storage))?;
        tracing::info!(location = %store.storage_location(), "bills loaded");

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            store,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
        })
    }

    pub fn prompt(&self) -> String {
        if self.store.is_dirty() {
            "bills*> ".into()
        } else {
            "bills> ".into()
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    /// Asks for confirmation in interactive mode; scripts always proceed.
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        if !self.is_interactive() {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, default)
    }

    /// Prints the totals line; called after every mutating command.
    pub fn show_totals(&self) {
        println!("{}", render::styled_totals_line(&self.store.compute_totals()));
    }

    pub fn show_bills(&self) {
        output::section("Bills");
        println!("Balance: ${:.2}", self.store.balance().balance);
        if self.store.is_empty() {
            cli_io::print_info("No bills. Use `add` to create one.");
        } else {
            println!("{}", render::bills_table(self.store.bills()));
        }
        self.show_totals();
    }
}
