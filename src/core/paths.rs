// src/core/paths.rs

//! The configuration directory and user-supplied path templates.

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILENAME};
use lazy_static::lazy_static;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

lazy_static! {
    static ref HIMENU_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Errors from config directory lookup and path expansion.
#[derive(Error, Debug)]
pub enum PathError {
    /// The platform has no config directory and no override was given.
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    /// The config directory did not exist and could not be created.
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        /// The directory.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A `~` or variable in a path could not be expanded.
    #[error("Could not expand path '{template}': {reason}")]
    Expansion {
        /// The path as written.
        template: String,
        /// Why expansion failed.
        reason: String,
    },
}

/// Returns the himenu configuration directory (`~/.config/himenu` or the value of
/// `HIMENU_CONFIG_DIR`), creating it if needed.
///
/// Memoized: the first call computes and caches the path.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    let mut cached = HIMENU_CONFIG_DIR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(path) = &*cached {
        return Ok(path.clone());
    }

    let config_path = resolve_config_dir(std::env::var_os(CONFIG_DIR_ENV))?;
    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached = Some(config_path.clone());
    Ok(config_path)
}

/// Picks the config directory: a non-empty override wins over the platform default.
pub fn resolve_config_dir(env_override: Option<OsString>) -> Result<PathBuf, PathError> {
    match env_override.filter(|value| !value.is_empty()) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(dirs::config_dir()
            .ok_or(PathError::ConfigDirNotFound)?
            .join(CONFIG_DIR_NAME)),
    }
}

/// The path of `config.toml` inside the config directory.
pub fn get_config_file_path() -> Result<PathBuf, PathError> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a user-supplied path.
pub fn expand_path_template(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let dir = resolve_config_dir(Some(OsString::from("/tmp/himenu-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/himenu-test"));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let result = resolve_config_dir(Some(OsString::new()));
        if let Some(system) = dirs::config_dir() {
            assert_eq!(result.unwrap(), system.join(CONFIG_DIR_NAME));
        } else {
            assert!(matches!(result, Err(PathError::ConfigDirNotFound)));
        }
    }

    #[test]
    fn test_expand_plain_path_is_unchanged() {
        assert_eq!(
            expand_path_template(r"menus\main.toml").unwrap(),
            PathBuf::from(r"menus\main.toml")
        );
    }

    #[test]
    fn test_expand_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let expanded = expand_path_template("~/menus/main.toml").unwrap();
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with("menus/main.toml"));
    }

    #[test]
    fn test_expand_unknown_variable_fails() {
        let result = expand_path_template("$HIMENU_TEST_SURELY_UNSET_VAR_3e7/main.toml");
        assert!(matches!(result, Err(PathError::Expansion { .. })));
    }
}
