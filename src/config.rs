use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::PolicyMode;
use crate::error::{ReleaseError, Result};

/// Name of the configuration file looked up in the working and config directories
pub const CONFIG_FILE_NAME: &str = "moodle-release.toml";

/// Represents the complete configuration for moodle-release.
///
/// Every key is optional; missing keys fall back to the defaults used by the
/// Moodle release process.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// File name appended when `--path` points at a directory
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// Release timezone as whole hours east of UTC (Perth by default)
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,

    /// Which revision of the release rules to apply
    #[serde(default)]
    pub policy: PolicyMode,

    /// Default `tracing` filter when neither `-v` nor `RUST_LOG` is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Returns the default version file name.
fn default_version_file() -> String {
    "version.php".to_string()
}

/// Returns the default UTC offset (Australia/Perth).
fn default_utc_offset_hours() -> i32 {
    8
}

/// Returns the default log filter.
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_file: default_version_file(),
            utc_offset_hours: default_utc_offset_hours(),
            policy: PolicyMode::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| ReleaseError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(ReleaseError::config(format!(
                "utc_offset_hours must be between -12 and 14, got {}",
                self.utc_offset_hours
            )));
        }
        if self.version_file.trim().is_empty() {
            return Err(ReleaseError::config("version_file must not be empty"));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `moodle-release.toml` in current directory
/// 3. `moodle-release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)
            .map_err(|e| ReleaseError::config(format!("cannot read {}: {}", path, e)))?
    } else if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.version_file, "version.php");
        assert_eq!(config.utc_offset_hours, 8);
        assert_eq!(config.policy, PolicyMode::Current);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml("policy = \"legacy\"\nutc_offset_hours = 0\n").unwrap();
        assert_eq!(config.policy, PolicyMode::Legacy);
        assert_eq!(config.utc_offset_hours, 0);
        assert_eq!(config.version_file, "version.php");
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_toml("utc_offset_hours = 20").is_err());
        assert!(Config::from_toml("version_file = \"  \"").is_err());
        assert!(Config::from_toml("policy = \"ancient\"").is_err());
    }
}
