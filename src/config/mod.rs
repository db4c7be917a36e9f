pub use mf_core::config::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Candidate locations searched when no `--config` is given.
const DEFAULT_PATHS: [&str; 3] = [
    "./mediafacts.toml",
    "~/.config/mediafacts/config.toml",
    "/etc/mediafacts/config.toml",
];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    for path_str in DEFAULT_PATHS {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
///
/// Unknown digest algorithms and a zero read buffer are fatal. Anything
/// [`Config::validate`] reports is logged and tolerated.
pub fn validate_config(config: &Config) -> Result<()> {
    mf_digest::Algorithm::parse_list(&config.digest.algorithms)?;

    if config.digest.buffer_size == 0 {
        anyhow::bail!(mf_core::Error::Config(
            "digest.buffer_size must be greater than 0".into()
        ));
    }

    for warning in config.validate() {
        tracing::warn!("{}", warning);
    }

    Ok(())
}
