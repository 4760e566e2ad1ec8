//! Settings validation

use crate::error::{Result, ScopeError};
use crate::models::config::Settings;
use std::path::Path;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return the first problem found
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.scan_path.exists() {
            return Err(ScopeError::InvalidPath {
                path: settings.scan_path.clone(),
            });
        }

        for name in &settings.exclude_dirs {
            Self::validate_exclude_name(name)?;
        }

        if settings.threads == Some(0) {
            return Err(ScopeError::config_error("threads must be at least 1"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }
        if let Some(path) = &settings.dot_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    fn validate_exclude_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ScopeError::config_error("exclude names must not be empty"));
        }
        if name.contains(['/', '\\']) {
            return Err(ScopeError::config_error(format!(
                "exclude name '{}' must be a single directory name, not a path",
                name
            )));
        }
        Ok(())
    }

    /// The parent directory of an output file must already exist
    fn validate_output_path(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(ScopeError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }
}
