use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Settings for the ledger, stored in `config.json` next to the record file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    /// How many entries `recent` shows when no count is given
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// Keys accepted by `vibe config`.
pub const KEYS: &[&str] = &["recent-limit"];

impl LedgerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LedgerError::FileRead)?;
        let config: LedgerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LedgerError::DirectoryCreate)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content).map_err(LedgerError::FileWrite)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "recent-limit" => Ok(self.recent_limit.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "recent-limit" => {
                self.recent_limit = value.parse().map_err(|_| {
                    LedgerError::InvalidInput(format!(
                        "recent-limit must be a whole number, got '{}'",
                        value
                    ))
                })?;
                Ok(())
            }
            other => Err(unknown_key(other)),
        }
    }
}

fn unknown_key(key: &str) -> LedgerError {
    LedgerError::InvalidInput(format!(
        "Unknown config key '{}' (known: {})",
        key,
        KEYS.join(", ")
    ))
}
