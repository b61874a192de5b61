//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Program and arguments that print the power-management log.
    pub log_command: Vec<String>,

    /// Program and arguments that print the current battery reading.
    pub sample_command: Vec<String>,

    /// Close a trailing open discharge window against a live reading by default.
    pub close_open_period: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_command: vec!["pmset".into(), "-g".into(), "log".into()],
            sample_command: vec!["pmset".into(), "-g".into(), "batt".into()],
            close_open_period: false,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (BH_*)
        figment = figment.merge(Env::prefixed("BH_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for bh.
///
/// On Linux: `~/.config/bh`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("bh"))
}
