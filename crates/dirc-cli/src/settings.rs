//! Settings file loading.
//!
//! The settings file names two locations:
//!
//! ```json
//! { "db_for_cleaning": "watch.json", "log_file": "dirc.csv" }
//! ```
//!
//! A `.toml` file with the same keys is accepted too. Missing or non-string
//! keys produce a warning and stay empty; they are never fatal.

use crate::error::{ConfigError, Result};
use dirc_janitor::JanitorConfig;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Key naming the watch-list file.
pub const DB_KEY: &str = "db_for_cleaning";

/// Key naming the audit log file.
pub const LOG_KEY: &str = "log_file";

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Resolved settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Location of the JSON watch list (empty: no watch entries)
    pub db_location: String,

    /// Location of the audit log (empty: reporting disabled)
    pub log_file_location: String,
}

impl Settings {
    /// Load settings from a JSON (or `.toml`) file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let document = if is_toml(path) {
            let table: toml::Value = toml::from_str(&contents)?;
            serde_json::to_value(table)?
        } else {
            serde_json::from_str(&contents)?
        };

        Self::from_value(&document)
    }

    /// Load settings, falling back to empty settings on any error.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                tracing::info!("Configuration file found: {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("{}; continuing with empty configuration", e);
                Self::default()
            }
        }
    }

    /// Extract settings from a parsed document.
    pub fn from_value(document: &Value) -> Result<Self> {
        let object = document
            .as_object()
            .ok_or_else(|| ConfigError::Invalid("settings must be an object".into()))?;

        let db_location = match object.get(DB_KEY).and_then(Value::as_str) {
            Some(db) => db.to_string(),
            None => {
                tracing::warn!("Missing db path ('{}') in settings file", DB_KEY);
                String::new()
            }
        };

        let log_file_location = match object.get(LOG_KEY).and_then(Value::as_str) {
            Some(log) => log.to_string(),
            None => {
                tracing::warn!("Missing log file ('{}') in settings file", LOG_KEY);
                String::new()
            }
        };

        Ok(Self {
            db_location,
            log_file_location,
        })
    }

    /// Audit log path, or `None` when reporting is disabled.
    pub fn audit_destination(&self) -> Option<PathBuf> {
        self.janitor_config(false).audit_log
    }

    /// Engine configuration derived from these settings.
    pub fn janitor_config(&self, dry_run: bool) -> JanitorConfig {
        JanitorConfig::from_log_location(&self.log_file_location).dry_run(dry_run)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_complete() {
        let settings = Settings::from_value(&json!({
            "db_for_cleaning": "watch.json",
            "log_file": "dirc.csv"
        }))
        .unwrap();

        assert_eq!(settings.db_location, "watch.json");
        assert_eq!(settings.log_file_location, "dirc.csv");
        assert_eq!(settings.audit_destination(), Some(PathBuf::from("dirc.csv")));
    }

    #[test]
    fn test_non_string_fields_stay_empty() {
        let settings = Settings::from_value(&json!({
            "db_for_cleaning": 42,
        }))
        .unwrap();

        assert_eq!(settings, Settings::default());
        assert!(settings.audit_destination().is_none());
    }

    #[test]
    fn test_non_object_is_invalid() {
        assert!(matches!(
            Settings::from_value(&json!(["a", "b"])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_janitor_config() {
        let settings = Settings {
            db_location: "watch.json".into(),
            log_file_location: String::new(),
        };
        let config = settings.janitor_config(true);
        assert!(config.audit_log.is_none());
        assert!(config.dry_run);
    }

    #[test]
    fn test_janitor_config_trims_log_location() {
        let settings = Settings {
            db_location: String::new(),
            log_file_location: "  /tmp/dirc.csv ".into(),
        };
        let config = settings.janitor_config(false);
        assert_eq!(config.audit_log(), Some(Path::new("/tmp/dirc.csv")));
        assert!(!config.dry_run);
        assert_eq!(settings.audit_destination(), Some(PathBuf::from("/tmp/dirc.csv")));
    }
}
