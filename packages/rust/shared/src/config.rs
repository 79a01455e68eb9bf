//! Registry configuration for customsplit.
//!
//! User config lives at `~/.customsplit/customsplit.toml`. It names the
//! active converters in dispatch order; the embedding application supplies
//! the converter implementations themselves.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitConversionError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "customsplit.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".customsplit";

// ---------------------------------------------------------------------------
// Config structs (matching customsplit.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Converter registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// What reconstruction does when no converter claims a payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnclaimedInfoPolicy {
    /// Return the input split unchanged and discard the payload.
    #[default]
    Drop,
    /// Fail when a non-empty payload goes unclaimed.
    Reject,
}

/// `[registry]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Converter names in dispatch order. Earlier entries win ties.
    #[serde(default)]
    pub converters: Vec<String>,

    /// Fallback behavior for unclaimed payloads.
    #[serde(default)]
    pub unclaimed_info: UnclaimedInfoPolicy,
}

impl RegistryConfig {
    /// Reject empty or repeated converter names.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in &self.converters {
            if name.trim().is_empty() {
                return Err(SplitConversionError::config("converter name must not be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(SplitConversionError::config(format!(
                    "converter {name} listed more than once"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.customsplit/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SplitConversionError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.customsplit/customsplit.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SplitConversionError::io(path, e))?;

    parse_config(&content).map_err(|e| match e {
        SplitConversionError::Config { message } => {
            SplitConversionError::config(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

/// Parse and validate config from a TOML string.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(content)
        .map_err(|e| SplitConversionError::config(format!("failed to parse config: {e}")))?;
    config.registry.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    write_default_config(&dir)
}

fn write_default_config(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| SplitConversionError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content = toml::to_string_pretty(&config)
        .map_err(|e| SplitConversionError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SplitConversionError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
