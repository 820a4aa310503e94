use std::fs;
use std::path::PathBuf;

use crate::io::taskrc::expand_tilde;
use crate::model::PanelConfig;

/// Error type for panel configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config not found: {path}")]
    NotFound { path: PathBuf },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Default panel config location, e.g. `~/.config/taskpane/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("taskpane").join("config.toml"))
}

/// Load the panel configuration.
///
/// An explicit path must exist; a missing default file just means defaults.
pub fn load_config(hint: Option<&str>) -> Result<PanelConfig, ConfigError> {
    let (path, is_default) = match hint {
        Some(h) if !h.is_empty() => (expand_tilde(h), false),
        _ => match default_config_path() {
            Some(path) => (path, true),
            None => return Ok(PanelConfig::default()),
        },
    };

    if !path.exists() {
        if is_default {
            return Ok(PanelConfig::default());
        }
        return Err(ConfigError::NotFound { path });
    }

    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}
