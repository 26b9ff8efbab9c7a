//! Layered application configuration.
//!
//! Values come from built-in defaults, then `~/.config/campus-hub/config.toml`
//! when present, then `CAMPUS_HUB_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "campus-hub";

const DEFAULT_LATENCY_MS: u64 = 300;

const DEFAULT_CONFIG: &str = r#"# Campus Hub configuration

# Simulated round-trip for every list/add/search call, in milliseconds.
latency_ms = 300

# Start with the demo resources and rides.
seed_demo_data = true

# Directory for campus-hub.log, relative to the working directory.
log_dir = "logs"
"#;

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Delay applied to every access-layer call.
    pub latency_ms: u64,
    /// Whether the store starts with demo listings.
    pub seed_demo_data: bool,
    /// Where the log file is written.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            seed_demo_data: true,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    /// Load from the default location plus the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (optional) plus the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("latency_ms", defaults.latency_ms as i64)?
            .set_default("seed_demo_data", defaults.seed_demo_data)?
            .set_default("log_dir", defaults.log_dir.to_string_lossy().to_string())?
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("CAMPUS_HUB").try_parsing(true))
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        let config: Self = settings
            .try_deserialize()
            .context("failed to parse configuration")?;
        info!(latency_ms = config.latency_ms, seed = config.seed_demo_data, "Configuration loaded");
        Ok(config)
    }

    /// Simulated access-layer latency.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Default configuration file path.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write the commented default configuration if no file exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Write the commented default configuration to `path` unless it exists.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let temp = tempdir()?;
        let config = AppConfig::load_from(temp.path().join("absent.toml"))?;
        assert_eq!(config.latency(), Duration::from_millis(300));
        assert!(config.seed_demo_data);
        Ok(())
    }

    #[test]
    fn file_overrides_defaults() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("config.toml");
        fs::write(&path, "latency_ms = 25\nseed_demo_data = false\n")?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.latency_ms, 25);
        assert!(!config.seed_demo_data);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        Ok(())
    }

    #[test]
    fn default_config_is_written_once_and_parses() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("nested/config.toml");

        assert!(ensure_default_config_at(&path)?);
        assert!(!ensure_default_config_at(&path)?);
        assert_eq!(AppConfig::load_from(&path)?, AppConfig::default());
        Ok(())
    }
}
