use dialoguer::theme::ColorfulTheme;

use crate::{config::Config, core::ReportService, ledger::RecordKind};

use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub service: ReportService,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        let count = self.service.record_count();
        format!("budget [{count}]> ")
    }

    /// Category used when an entry command omits one.
    pub fn default_category(&self, kind: RecordKind) -> String {
        self.config
            .categories_for(kind)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    pub fn currency_label(&self) -> &str {
        &self.config.currency_label
    }
}
