//! Runtime configuration for notekeep front ends.
//!
//! Resolution order, lowest to highest precedence: built-in defaults, the
//! JSON config file, `NOTEKEEP_*` environment variables, explicit overrides
//! (e.g. CLI flags).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::DEFAULT_NOTE_COLOR;
use crate::store::DEFAULT_STORE_KEY;
use crate::util::{is_color_token, normalize_text_option};

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "notekeep";

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "NOTEKEEP_DB_PATH";
/// Environment variable overriding the store key.
pub const STORE_KEY_ENV: &str = "NOTEKEEP_STORE_KEY";

/// Persistent settings, all optional in the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NotekeepConfig {
    /// `SQLite` file holding the note collection
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// Key the collection is stored under
    #[serde(default)]
    pub store_key: Option<String>,
    /// Color for notes created without one
    #[serde(default)]
    pub default_color: Option<String>,
}

impl NotekeepConfig {
    /// Load from the platform config directory; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            Error::Config(format!("failed to read {}: {error}", path.display()))
        })?;
        let config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            Error::Config(format!("failed to parse {}: {error}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `NOTEKEEP_DB_PATH` / `NOTEKEEP_STORE_KEY` when set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var_os(DB_PATH_ENV).map(PathBuf::from),
            std::env::var(STORE_KEY_ENV).ok(),
        )
    }

    /// Replace fields with explicitly provided values.
    #[must_use]
    pub fn with_overrides(mut self, db_path: Option<PathBuf>, store_key: Option<String>) -> Self {
        if let Some(db_path) = db_path.filter(|path| !path.as_os_str().is_empty()) {
            self.db_path = Some(db_path);
        }
        if let Some(store_key) = normalize_text_option(store_key) {
            self.store_key = Some(store_key);
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(color) = self.default_color.as_deref() {
            if !is_color_token(color) {
                return Err(Error::Config(format!(
                    "default_color '{color}' is not a hex color like #ffffff"
                )));
            }
        }
        Ok(())
    }

    /// Database path, falling back to the platform data directory.
    pub fn resolved_db_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }
        default_db_path()
            .ok_or_else(|| Error::Config("could not determine a data directory".into()))
    }

    pub fn resolved_store_key(&self) -> String {
        normalize_text_option(self.store_key.clone())
            .unwrap_or_else(|| DEFAULT_STORE_KEY.to_string())
    }

    pub fn resolved_default_color(&self) -> String {
        self.default_color
            .clone()
            .unwrap_or_else(|| DEFAULT_NOTE_COLOR.to_string())
    }
}

/// `<config dir>/notekeep/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `<data dir>/notekeep/notekeep.db`
pub fn default_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join("notekeep.db"))
}
