use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::LedgerError;

const CONFIG_FILE: &str = "expense_log.toml";
const APP_DIR: &str = "expense_log";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub currency: char,
    pub decimal_sep: char,
    pub dark_mode: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: '$',
            decimal_sep: '.',
            dark_mode: false,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, LedgerError> {
        let config: AppConfig = toml::from_str(content)?;
        if !matches!(config.decimal_sep, '.' | ',') {
            return Err(LedgerError::InvalidArgument(format!(
                "decimal_sep must be '.' or ',', got {:?}",
                config.decimal_sep
            )));
        }
        Ok(config)
    }

    pub fn read(path: &Path) -> Result<Self, LedgerError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Where the log file goes when the config does not name one.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(std::env::temp_dir)
                .join("expense_log.log")
        })
    }
}

fn default_locations() -> Result<Vec<PathBuf>, LedgerError> {
    let mut locations = vec![std::env::current_dir()?.join(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join(APP_DIR).join("config.toml"));
    }
    Ok(locations)
}

/// Loads the configuration.
///
/// An explicit path must exist. Otherwise the first file found in the
/// working directory or the user config directory is used, and the defaults
/// apply when there is none.
pub fn load_config(
    explicit: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), LedgerError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(LedgerError::InvalidArgument(format!(
                "No config file found at {}",
                path.display()
            )));
        }
        return Ok((AppConfig::read(path)?, Some(path.to_path_buf())));
    }

    for path in default_locations()? {
        if path.exists() {
            return Ok((AppConfig::read(&path)?, Some(path)));
        }
    }
    Ok((AppConfig::default(), None))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_all_fields() {
        let config = AppConfig::from_toml(
            r#"
currency = "€"
decimal_sep = ","
dark_mode = true
log_file = "/tmp/expenses.log"
"#,
        )
        .unwrap();

        assert_eq!(config.currency, '€');
        assert_eq!(config.decimal_sep, ',');
        assert!(config.dark_mode);
        assert_eq!(config.log_path(), PathBuf::from("/tmp/expenses.log"));
    }

    #[test]
    fn rejects_unknown_fields_and_bad_separator() {
        assert!(matches!(
            AppConfig::from_toml("user_name = \"me\""),
            Err(LedgerError::Deserialization(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("decimal_sep = \";\""),
            Err(LedgerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn explicit_path_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "currency = \"£\"").unwrap();

        let (config, source) = load_config(Some(file.path())).unwrap();

        assert_eq!(config.currency, '£');
        assert_eq!(source.as_deref(), Some(file.path()));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(
            load_config(Some(&missing)),
            Err(LedgerError::InvalidArgument(_))
        ));
    }
}
