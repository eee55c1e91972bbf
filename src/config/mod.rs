mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

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

    let default_paths = [
        "./unable.toml",
        "~/.config/unable/config.toml",
        "/etc/unable/config.toml",
    ];

    for path_str in default_paths {
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
    let output = &config.output;

    // Without a suffix or a separate directory the output would replace the input
    if output.suffix.is_empty() && output.dir.is_none() {
        anyhow::bail!("output.suffix cannot be empty unless output.dir is set");
    }

    if output.suffix.contains(std::path::is_separator) {
        anyhow::bail!("output.suffix cannot contain a path separator");
    }

    if let Some(dir) = &output.dir {
        if !dir.is_dir() {
            tracing::warn!("Output directory does not exist yet: {:?}", dir);
        }
    }

    Ok(())
}
