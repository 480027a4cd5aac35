//! # Application Configuration
//!
//! Optional YAML settings read from `expense_tracker.yaml` in the data
//! directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! expenses_file: "Expenses.json"
//! charts_file: "expense_charts.svg"
//! currency_symbol: "$"
//! ```
//!
//! Every key is optional. A missing file means defaults; a file that does not
//! parse is logged and ignored.

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "expense_tracker.yaml";
const DATA_DIRECTORY_NAME: &str = "Expense Tracker";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// File name of the persisted expense list inside the data directory
    pub expenses_file: String,
    /// File name the charts are rendered to inside the data directory
    pub charts_file: String,
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            expenses_file: "Expenses.json".to_string(),
            charts_file: "expense_charts.svg".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the config from `data_dir`, falling back to defaults
    pub fn load(data_dir: &Path) -> Self {
        let config_path = data_dir.join(CONFIG_FILE_NAME);

        let yaml_content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {:?}, using defaults", config_path);
                return Self::default();
            }
            Err(e) => {
                error!("Failed to read config file {:?}: {}", config_path, e);
                return Self::default();
            }
        };

        match serde_yaml::from_str::<AppConfig>(&yaml_content) {
            Ok(config) => {
                info!("Loaded config from {:?}", config_path);
                config
            }
            Err(e) => {
                error!("Ignoring malformed config file {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }
}

/// Pick the data directory: explicit choice, then Documents, then the working directory
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }

    match dirs::document_dir() {
        Some(docs_dir) => docs_dir.join(DATA_DIRECTORY_NAME),
        None => {
            info!("No documents directory found, using the current directory");
            PathBuf::from(".")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let config = AppConfig::load(temp_dir.path());

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.expenses_file, "Expenses.json");
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "currency_symbol: \"€\"\n",
        )
        .unwrap();

        let config = AppConfig::load(temp_dir.path());

        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.expenses_file, "Expenses.json");
        assert_eq!(config.charts_file, "expense_charts.svg");
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "expenses_file: [unclosed").unwrap();

        assert_eq!(AppConfig::load(temp_dir.path()), AppConfig::default());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = PathBuf::from("/tmp/somewhere");
        assert_eq!(resolve_data_dir(Some(dir.clone())), dir);
    }
}
