//! User preferences persisted as JSON next to the ledger data.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, tmp_path, PathResolver};
use crate::errors::{LedgerError, Result};

/// Keys accepted by `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "data_file",
    "currency_symbol",
    "ui_color_enabled",
    "plain_output",
    "history_limit",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Overrides the ledger location. Defaults to `<base>/data/finances.csv`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default = "Config::default_history_limit")]
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            currency_symbol: Self::default_currency_symbol(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            plain_output: false,
            history_limit: Self::default_history_limit(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_history_limit() -> usize {
        20
    }

    /// Applies a textual `key = value` update as typed in the shell.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "data_file" => {
                self.data_file = if value.is_empty() || value.eq_ignore_ascii_case("default") {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "ui_color_enabled" => self.ui_color_enabled = parse_flag(key, value)?,
            "plain_output" => self.plain_output = parse_flag(key, value)?,
            "history_limit" => {
                self.history_limit = value.parse::<usize>().map_err(|_| {
                    LedgerError::InvalidInput(format!(
                        "history_limit must be a non-negative integer, got `{}`",
                        value
                    ))
                })?;
            }
            other => {
                return Err(LedgerError::InvalidInput(format!(
                    "unknown configuration key `{}` (expected one of {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Rows for display, in the same order as [`CONFIG_KEYS`].
    pub fn entries(&self, base: &Path) -> Vec<(&'static str, String)> {
        vec![
            (
                "data_file",
                self.resolve_data_file(base).display().to_string(),
            ),
            ("currency_symbol", self.currency_symbol.clone()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("plain_output", self.plain_output.to_string()),
            ("history_limit", self.history_limit.to_string()),
        ]
    }

    pub fn resolve_data_file(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => PathResolver::data_file_in(base),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(LedgerError::InvalidInput(format!(
            "{} expects on/off, got `{}`",
            key, value
        ))),
    }
}

/// Loads and saves [`Config`] under the application base directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        let path = PathResolver::config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.resolve_data_file(manager.base_dir()),
            temp.path().join("data").join("finances.csv")
        );
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set_value("currency_symbol", "€").unwrap();
        config.set_value("plain_output", "on").unwrap();
        config.set_value("history_limit", "5").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert!(loaded.plain_output);
        assert_eq!(loaded.history_limit, 5);
        assert!(!manager.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn partial_file_falls_back_to_field_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::create_dir_all(manager.path().parent().unwrap()).unwrap();
        fs::write(manager.path(), r#"{ "plain_output": true }"#).unwrap();
        let config = manager.load().unwrap();
        assert!(config.plain_output);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.history_limit, 20);
    }

    #[test]
    fn relative_data_file_resolves_against_base() {
        let mut config = Config::default();
        config.set_value("data_file", "ledgers/home.csv").unwrap();
        assert_eq!(
            config.resolve_data_file(Path::new("/srv/tracker")),
            PathBuf::from("/srv/tracker/ledgers/home.csv")
        );
        config.set_value("data_file", "default").unwrap();
        assert!(config.data_file.is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = Config::default();
        assert!(config.set_value("plain_output", "maybe").is_err());
        assert!(config.set_value("history_limit", "-1").is_err());
        assert!(config.set_value("theme", "dark").is_err());
        assert_eq!(config, Config::default());
    }
}
