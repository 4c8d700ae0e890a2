//! Ledger configuration (`rowtally.toml`).
//!
//! ```toml
//! sheet = "Potongan"
//! time_zone = "+07:00"
//!
//! [ledger]
//! watched_columns = [3, 4, 5, 6, 7, 8, 9]
//! total_column = 10
//! timestamp_column = 11
//! number_format = "#,###"
//! timestamp_pattern = "yyyy-MM-dd HH:mm:ss"
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use rowtally_core::LedgerLayout;
use rowtally_core::layout::{
    DEFAULT_NUMBER_FORMAT, DEFAULT_TIMESTAMP_COLUMN, DEFAULT_TIMESTAMP_PATTERN, DEFAULT_TOTAL_COLUMN,
    DEFAULT_WATCHED_COLUMNS,
};
use rowtally_engine::engine::ScriptTimeZone;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_SHEET_NAME: &str = "Sheet1";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    sheet: Option<String>,
    time_zone: Option<ScriptTimeZone>,
    ledger: LedgerSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LedgerSection {
    watched_columns: Vec<usize>,
    total_column: usize,
    timestamp_column: usize,
    number_format: String,
    timestamp_pattern: String,
}

impl Default for LedgerSection {
    fn default() -> Self {
        LedgerSection {
            watched_columns: DEFAULT_WATCHED_COLUMNS.to_vec(),
            total_column: DEFAULT_TOTAL_COLUMN,
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN,
            number_format: DEFAULT_NUMBER_FORMAT.to_string(),
            timestamp_pattern: DEFAULT_TIMESTAMP_PATTERN.to_string(),
        }
    }
}

/// Resolved configuration.
#[derive(Debug, PartialEq)]
pub struct Config {
    pub sheet_name: String,
    pub time_zone: ScriptTimeZone,
    pub layout: LedgerLayout,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            time_zone: ScriptTimeZone::default(),
            layout: LedgerLayout::default(),
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;
        let ledger = file.ledger;
        let layout = LedgerLayout::new(
            ledger.watched_columns,
            ledger.total_column,
            ledger.timestamp_column,
            &ledger.number_format,
            &ledger.timestamp_pattern,
        )?;
        Ok(Config {
            sheet_name: file.sheet.unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            time_zone: file.time_zone.unwrap_or_default(),
            layout,
        })
    }
}

/// Load the configuration.
///
/// An explicit `config_file` must exist and parse. Otherwise `rowtally.toml`
/// in the user config directory is used when present; a broken user file is
/// reported as a warning and the defaults apply.
pub fn load_config(config_file: Option<&Path>) -> Result<(Config, Vec<String>)> {
    let mut warnings = Vec::new();

    if let Some(path) = config_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Config::from_toml(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        return Ok((config, warnings));
    }

    let Some(path) = user_config_path().filter(|p| p.is_file()) else {
        return Ok((Config::default(), warnings));
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => match Config::from_toml(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded user config");
                return Ok((config, warnings));
            }
            Err(err) => warnings.push(format!("Failed to parse {}: {:#}", path.display(), err)),
        },
        Err(err) => warnings.push(format!("Failed to read {}: {}", path.display(), err)),
    }
    Ok((Config::default(), warnings))
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "rowtally")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("rowtally.toml");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r##"
            sheet = "Potongan"
            time_zone = "+07:00"

            [ledger]
            watched_columns = [2, 3]
            total_column = 4
            timestamp_column = 5
            number_format = "#,##0.00"
            timestamp_pattern = "dd/MM/yyyy HH:mm"
            "##,
        )
        .unwrap();
        assert_eq!(config.sheet_name, "Potongan");
        assert_eq!(config.time_zone, "+07:00".parse::<ScriptTimeZone>().unwrap());
        assert_eq!(config.layout.watched_columns(), &[2, 3]);
        assert_eq!(config.layout.number_format(), "#,##0.00");
        assert_eq!(config.layout.timestamp_pattern().as_str(), "dd/MM/yyyy HH:mm");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_toml("time_zone = \"Mars/Olympus\"").is_err());
        assert!(Config::from_toml("[ledger]\ntotal_column = 3").is_err());
        assert!(Config::from_toml("colour = \"red\"").is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn test_user_config_path_names_rowtally_toml() {
        // None only when no home directory can be found.
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("rowtally.toml"));
            assert_eq!(user_config_path(), Some(path));
        }
    }
}
