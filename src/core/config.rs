// src/core/config.rs

//! Loading of the launcher's own `config.toml`, and the choice of the menu a
//! session starts on.

use crate::{
    core::paths::{self, PathError},
    models::LauncherConfig,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Why the launcher config could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config directory is unavailable.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The file exists but could not be read.
    #[error("Could not read '{path}': {source}")]
    Read {
        /// The config file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`LauncherConfig`].
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        /// The config file.
        path: String,
        /// The parser error.
        #[source]
        source: toml::de::Error,
    },
}

/// Loads `config.toml` from the himenu config directory.
pub fn load_config() -> Result<LauncherConfig, ConfigError> {
    let path = paths::get_config_file_path()?;
    load_config_from(&path)
}

/// Loads a launcher config file. A missing file yields the defaults; a malformed
/// one is an error.
pub fn load_config_from(path: &Path) -> Result<LauncherConfig, ConfigError> {
    if !path.is_file() {
        log::debug!("No launcher config at '{}', using defaults.", path.display());
        return Ok(LauncherConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: LauncherConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    log::debug!("Loaded launcher config from '{}'.", path.display());
    Ok(config)
}

/// The menu a session starts on: the one given on the command line, else the
/// configured `default_menu`, else none (an empty page).
pub fn initial_menu(
    cli_menu: Option<&str>,
    config: &LauncherConfig,
) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(menu) = cli_menu.filter(|m| !m.is_empty()) {
        return Ok(Some(PathBuf::from(menu)));
    }
    match config.default_menu.as_deref().filter(|m| !m.is_empty()) {
        Some(template) => Ok(Some(paths::expand_path_template(template)?)),
        None => Ok(None),
    }
}
