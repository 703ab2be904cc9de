//! Configuration management for gatekey.
//!
//! Loads configuration from ${GATEKEY_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for gatekey configuration and data.
    //!
    //! GATEKEY_HOME resolution order:
    //! 1. GATEKEY_HOME environment variable (if set)
    //! 2. ~/.config/gatekey (default)

    use std::path::PathBuf;

    /// Returns the gatekey home directory.
    pub fn gatekey_home() -> PathBuf {
        if let Ok(home) = std::env::var("GATEKEY_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("gatekey"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        gatekey_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        gatekey_home().join("session.json")
    }

    /// Returns the directory for log files.
    pub fn log_dir() -> PathBuf {
        gatekey_home().join("logs")
    }
}

/// Default config template written by `config init`.
const CONFIG_TEMPLATE: &str = "\
# gatekey configuration.
#
# Base URL of the authentication API.
#base_url = \"https://akil-backend.onrender.com\"
#
# Seconds before the verification code can be re-sent.
#resend_cooldown_secs = 30
#
# Seconds before post-success screens redirect.
#redirect_delay_secs = 2
";

fn default_base_url() -> String {
    Config::DEFAULT_BASE_URL.to_string()
}

fn default_resend_cooldown() -> u32 {
    Config::DEFAULT_RESEND_COOLDOWN_SECS
}

fn default_redirect_delay() -> u32 {
    Config::DEFAULT_REDIRECT_DELAY_SECS
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the remote authentication API.
    pub base_url: String,

    /// Cooldown in seconds before the verification code can be re-sent.
    pub resend_cooldown_secs: u32,

    /// Delay in seconds before post-success navigation.
    pub redirect_delay_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resend_cooldown_secs: default_resend_cooldown(),
            redirect_delay_secs: default_redirect_delay(),
        }
    }
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "https://akil-backend.onrender.com";
    pub const DEFAULT_RESEND_COOLDOWN_SECS: u32 = 30;
    pub const DEFAULT_REDIRECT_DELAY_SECS: u32 = 2;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented config template to `path`.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
        assert_eq!(config.resend_cooldown_secs, 30);
        assert_eq!(config.redirect_delay_secs, 2);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "base_url = \"http://localhost:9000\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.resend_cooldown_secs, 30);
    }

    #[test]
    fn test_load_malformed_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "base_url = [not toml").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn test_init_creates_parent_dirs_and_template() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("base_url"));
        // Template is all comments; parsing it yields defaults.
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_init_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }
}
