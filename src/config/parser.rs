//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{Result, ScopeError};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ScopeError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ScopeError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| ScopeError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(scan_path) = &settings.scan_path {
        if scan_path.as_os_str().is_empty() {
            return Err(ScopeError::config_error(format!(
                "Invalid empty scan_path in config file: {}",
                path.display()
            )));
        }
    }

    if let Some(names) = &settings.exclude_dirs {
        for name in names {
            if name.is_empty() {
                return Err(ScopeError::config_error(format!(
                    "Empty exclude_dirs entry in config file: {}",
                    path.display()
                )));
            }
            if name.contains(['/', '\\']) {
                return Err(ScopeError::config_error(format!(
                    "exclude_dirs entry '{}' in config file {} must be a plain directory name",
                    name,
                    path.display()
                )));
            }
        }
    }

    if settings.threads == Some(0) {
        return Err(ScopeError::config_error(format!(
            "Invalid threads = 0 in config file: {}. Must be at least 1.",
            path.display()
        )));
    }

    for (key, value) in [("output_file", &settings.output_file), ("dot_file", &settings.dot_file)] {
        if let Some(file) = value {
            if file.as_os_str().is_empty() {
                return Err(ScopeError::config_error(format!(
                    "Invalid empty {} in config file: {}",
                    key,
                    path.display()
                )));
            }
        }
    }

    Ok(())
}

/// Default config file locations, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("reposcope").join("config.toml"));
    }
    locations
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            tracing::debug!(path = %location.display(), "using config file");
            return Ok(Some(parse_config_file(location)?));
        }
    }
    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(ScopeError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config).map_err(|e| ScopeError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
