//! Configuration for the `glint` CLI.
//!
//! Mirrors `faxt::config::Config`: a `toml`+`serde` struct, searched for in
//! the current directory, then the user's home directory, then the system
//! config directory, falling back to defaults when none is found.

use std::path::{Path, PathBuf};

use dirs::{config_dir, home_dir};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

pub const CONFIG_FILE_NAME: &str = "glint.toml";

/// CLI-wide configuration. Nothing here reaches the `glint` engine itself —
/// `Compile`/`Render` never read files or environment on their own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Global verbose setting.
    #[serde(default)]
    pub verbose: bool,

    /// Render-specific configuration.
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Text encoding assumed for template and data files read from disk.
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// If true, a missing-variable lookup is logged at `warn` level (the
    /// default); if false, it renders its placeholder silently.
    #[serde(default = "default_true")]
    pub warn_on_missing_variable: bool,
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            render: RenderConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            warn_on_missing_variable: default_true(),
        }
    }
}

impl Config {
    /// Loads configuration from the first of: current directory, home
    /// directory, system config directory. Returns defaults if none exist.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("failed to parse configuration: {e}")))
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("glint").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("glint").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_sensible_values() {
        let config = Config::default();
        assert!(!config.verbose);
        assert_eq!(config.render.encoding, "utf-8");
        assert!(config.render.warn_on_missing_variable);
    }

    #[test]
    fn load_from_path_round_trips_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("glint.toml");
        std::fs::write(&path, "verbose = true\n[render]\nencoding = \"latin-1\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(config.verbose);
        assert_eq!(config.render.encoding, "latin-1");
        assert!(config.render.warn_on_missing_variable);
    }

    #[test]
    fn load_from_missing_path_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load_from_path(&path).is_err());
    }
}
