use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Path to the taskwarrior rc file. `~/` expands to the home directory.
    /// Absent means taskwarrior's default location.
    #[serde(default)]
    pub taskrc: Option<String>,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Column bounds for the rendered panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,
    #[serde(default = "default_max_project_length")]
    pub max_project_length: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            max_description_length: 60,
            max_project_length: 30,
        }
    }
}

fn default_max_description_length() -> usize {
    60
}

fn default_max_project_length() -> usize {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSettings {
    /// Periodic refresh interval in seconds. 0 disables the timer; the
    /// filesystem watcher and the `r` key still trigger refreshes.
    #[serde(default)]
    pub interval_secs: u64,
    /// Bounded wait for the `task export` call.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        RefreshSettings {
            interval_secs: 0,
            fetch_timeout_secs: 10,
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

impl RefreshSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn interval(&self) -> Option<Duration> {
        if self.interval_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.interval_secs))
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides for theme slots, e.g. `text = "#B0AAFF"`.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
