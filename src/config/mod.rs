use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    core::utils::{app_data_dir, config_file_in, data_file_in, write_atomic},
    errors::LedgerError,
    ledger::RecordKind,
};

const DEFAULT_CURRENCY_LABEL: &str = "UZS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides `<app>/data/transactions.json`. Relative paths resolve
    /// against the application directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub currency_label: String,
    /// Fraction digits shown when formatting amounts.
    pub amount_precision: u32,
    pub income_categories: Vec<String>,
    pub expense_categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            currency_label: DEFAULT_CURRENCY_LABEL.into(),
            amount_precision: 0,
            income_categories: owned(RecordKind::Income.default_categories()),
            expense_categories: owned(RecordKind::Expense.default_categories()),
        }
    }
}

impl Config {
    pub fn resolve_data_file(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => data_file_in(base),
        }
    }

    /// Suggested categories for entry prompts; falls back to the built-in
    /// list when the configured one is empty.
    pub fn categories_for(&self, kind: RecordKind) -> Vec<String> {
        let configured = match kind {
            RecordKind::Income => &self.income_categories,
            RecordKind::Expense => &self.expense_categories,
        };
        if configured.is_empty() {
            owned(kind.default_categories())
        } else {
            configured.clone()
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let path = config_file_in(&base);
        Self { base, path }
    }

    /// Missing file yields defaults; an unreadable one is an error rather
    /// than silently replaced.
    pub fn load(&self) -> Result<Config, LedgerError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file; using defaults");
                return Ok(Config::default());
            }
            Err(err) => return Err(err.into()),
        };
        serde_json::from_str(&data)
            .map_err(|err| LedgerError::Config(format!("{}: {}", self.path.display(), err)))
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        let config = manager.load().expect("defaults");
        assert_eq!(config, Config::default());
        assert_eq!(config.currency_label, "UZS");
        assert_eq!(config.income_categories, ["Salary", "Bonus", "Other"]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        let config = Config {
            data_file: Some(PathBuf::from("ledger.json")),
            currency_label: "EUR".into(),
            amount_precision: 2,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        fs::write(manager.path(), r#"{ "currency_label": "USD" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency_label, "USD");
        assert_eq!(config.expense_categories.len(), 4);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path());
        fs::write(manager.path(), "{ not json").unwrap();
        let err = manager.load().expect_err("malformed config");
        assert!(matches!(err, LedgerError::Config(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn data_file_resolution() {
        let base = Path::new("/srv/ledger");
        let mut config = Config::default();
        assert_eq!(
            config.resolve_data_file(base),
            base.join("data").join("transactions.json")
        );
        config.data_file = Some(PathBuf::from("custom.json"));
        assert_eq!(config.resolve_data_file(base), base.join("custom.json"));
    }

    #[test]
    fn empty_category_list_falls_back_to_builtin() {
        let config = Config {
            expense_categories: Vec::new(),
            ..Config::default()
        };
        assert_eq!(config.categories_for(RecordKind::Expense)[0], "Food");
    }
}
