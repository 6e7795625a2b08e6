//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG path →
//! built-in defaults.

use std::path::{Path, PathBuf};

/// Environment variable names.
const ENV_CONFIG_PATH: &str = "CW_CONFIG";
const ENV_CONFIG_DIR: &str = "CW_CONFIG_DIR";

/// Standard config file name.
const CONFIG_FILENAME: &str = "thresholds.json";

/// Application name for XDG directories.
const APP_NAME: &str = "cme-watch";

/// Where the configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Discovered configuration file path.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path to thresholds.json (or None for built-in defaults).
    pub thresholds: Option<PathBuf>,

    /// Source of the config (for diagnostics).
    pub source: ConfigSource,
}

/// Resolve the configuration path using the standard resolution order.
///
/// 1. Explicit CLI path (if provided)
/// 2. CW_CONFIG environment variable (direct path)
/// 3. CW_CONFIG_DIR environment variable + filename
/// 4. XDG config directory (~/.config/cme-watch/)
/// 5. Built-in defaults (None)
pub fn resolve_config(cli_path: Option<&Path>) -> ConfigPaths {
    if let Some(path) = cli_path {
        if path.exists() {
            return ConfigPaths {
                thresholds: Some(path.to_path_buf()),
                source: ConfigSource::CliArgument,
            };
        }
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return ConfigPaths {
                thresholds: Some(path),
                source: ConfigSource::Environment,
            };
        }
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(CONFIG_FILENAME);
        if path.exists() {
            return ConfigPaths {
                thresholds: Some(path),
                source: ConfigSource::Environment,
            };
        }
    }

    if let Some(xdg_config) = dirs::config_dir() {
        let path = xdg_config.join(APP_NAME).join(CONFIG_FILENAME);
        if path.exists() {
            return ConfigPaths {
                thresholds: Some(path),
                source: ConfigSource::XdgConfig,
            };
        }
    }

    ConfigPaths::default()
}
