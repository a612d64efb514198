use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::process_monitor::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOP_PROCESSES: usize = 5;
const DEFAULT_NETWORK_OVERVIEW_PROCESSES: usize = 10;

/// Keys accepted by `resmon config set`
pub const CONFIG_KEYS: [&str; 4] = [
    "command_timeout_secs",
    "top_processes",
    "network_overview_processes",
    "default_page_size",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds an external tool may run before it is killed
    pub command_timeout_secs: u64,
    /// Records per category in the resource-intensive summary
    pub top_processes: usize,
    /// Network processes listed in the system overview
    pub network_overview_processes: usize,
    /// Page size used when a request asks for less than one record
    pub default_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            top_processes: DEFAULT_TOP_PROCESSES,
            network_overview_processes: DEFAULT_NETWORK_OVERVIEW_PROCESSES,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path. A missing, empty or unreadable JSON file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring corrupt config file {:?}: {}", path, e);
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, data)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("resmon").join("config.json"))
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Set one value by key, validating it first
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let number: u64 = value
            .trim()
            .parse()
            .with_context(|| format!("'{}' is not a whole number", value))?;

        if number == 0 {
            bail!("{} must be at least 1", key);
        }

        match key {
            "command_timeout_secs" => self.command_timeout_secs = number,
            "top_processes" => self.top_processes = number as usize,
            "network_overview_processes" => self.network_overview_processes = number as usize,
            "default_page_size" => {
                if number > MAX_PAGE_SIZE as u64 {
                    bail!("default_page_size cannot exceed {}", MAX_PAGE_SIZE);
                }
                self.default_page_size = number as usize;
            }
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }

        Ok(())
    }
}
