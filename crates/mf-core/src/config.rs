//! Application configuration types.
//!
//! The top-level [`Config`] is deserialized from TOML by the binary. Every
//! section defaults sensibly so an empty file (or no file at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default timeout for a single external tool invocation.
pub const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 120;

/// Default read buffer for the digest scan.
pub const DEFAULT_DIGEST_BUFFER: usize = 64 * 1024;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub digest: DigestConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (name, path) in [
            ("exiftool_path", &self.tools.exiftool_path),
            ("mediainfo_path", &self.tools.mediainfo_path),
        ] {
            if let Some(p) = path {
                if !p.exists() {
                    warnings.push(format!(
                        "tools.{name} {} does not exist; falling back to PATH",
                        p.display()
                    ));
                }
            }
        }

        if self.tools.timeout_secs == 0 {
            warnings.push("tools.timeout_secs is 0; every tool call will time out".into());
        }

        warnings
    }
}

/// Overrides for the external metadata tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub exiftool_path: Option<PathBuf>,
    pub mediainfo_path: Option<PathBuf>,
    /// Seconds before a tool invocation is abandoned.
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            exiftool_path: None,
            mediainfo_path: None,
            timeout_secs: DEFAULT_TOOL_TIMEOUT_SECS,
        }
    }
}

/// Digest scan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    /// Algorithm names; empty means "all supported algorithms".
    pub algorithms: Vec<String>,
    pub buffer_size: usize,
    /// Fan each chunk out to the accumulators on a thread pool.
    pub parallel: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            algorithms: Vec::new(),
            buffer_size: DEFAULT_DIGEST_BUFFER,
            parallel: false,
        }
    }
}

/// Record output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent the emitted JSON.
    pub pretty: bool,
}
