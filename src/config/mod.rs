mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Locations tried, in order, when no config file is given.
pub const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "./flavy.toml",
    "~/.config/flavy/config.toml",
    "/etc/flavy/config.toml",
];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    for path_str in DEFAULT_CONFIG_PATHS {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.tools.ffmpeg_path.as_os_str().is_empty() {
        anyhow::bail!("tools.ffmpeg_path cannot be empty");
    }

    if config.tools.ffprobe_path.as_os_str().is_empty() {
        anyhow::bail!("tools.ffprobe_path cannot be empty");
    }

    if config.tools.timeout.is_zero() {
        anyhow::bail!("tools.timeout_secs cannot be 0");
    }

    Ok(())
}
