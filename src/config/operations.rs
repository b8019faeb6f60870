//! Config loading, validation, and command parsing.

use super::model::LauncherConfig;
use crate::env::is_valid_var_name;
use crate::error::{LauncherError, Result};
use std::path::Path;

impl LauncherConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(LauncherConfig)` - Successfully loaded and validated config
    /// * `Err(LauncherError::Config)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LauncherError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file if it exists.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an all-defaults struct.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: LauncherConfig = serde_yaml::from_str(yaml)
            .map_err(|e| LauncherError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `command` must parse to at least one word
    /// - `timeout_seconds` must be positive when set
    /// - credential lookup lists must be non-empty and hold valid variable names
    /// - `environment` keys must be valid variable names
    pub fn validate(&self) -> Result<()> {
        self.argv()?;

        if self.timeout_seconds == Some(0) {
            return Err(LauncherError::Config(
                "config validation failed: timeout_seconds must be greater than 0".to_string(),
            ));
        }

        for (field, names) in [
            ("access_token_vars", &self.access_token_vars),
            ("api_key_vars", &self.api_key_vars),
        ] {
            if names.is_empty() {
                return Err(LauncherError::Config(format!(
                    "config validation failed: {} must list at least one variable",
                    field
                )));
            }
            if let Some(bad) = names.iter().find(|n| !is_valid_var_name(n)) {
                return Err(LauncherError::Config(format!(
                    "config validation failed: {} contains invalid variable name '{}'",
                    field, bad
                )));
            }
        }

        if let Some(bad) = self.environment.keys().find(|k| !is_valid_var_name(k)) {
            return Err(LauncherError::Config(format!(
                "config validation failed: environment contains invalid variable name '{}'",
                bad
            )));
        }

        Ok(())
    }

    /// Split `command` into program and arguments.
    pub fn argv(&self) -> Result<Vec<String>> {
        let args = shell_words::split(&self.command).map_err(|e| {
            LauncherError::Config(format!(
                "failed to parse agent command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.command, e
            ))
        })?;

        if args.is_empty() {
            return Err(LauncherError::Config(format!(
                "agent command is empty after parsing: '{}'",
                self.command
            )));
        }

        Ok(args)
    }
}
