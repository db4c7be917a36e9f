//! External tool detection and management.
//!
//! The [`ToolRegistry`] discovers and caches the locations of the metadata
//! tools (exiftool, mediainfo) and provides lookup methods for the sources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Known tool names that the registry manages.
const KNOWN_TOOLS: &[&str] = &["exiftool", "mediainfo"];

/// Configuration for a single external tool.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Human-readable tool name (e.g. "exiftool").
    pub name: String,
    /// Resolved path to the executable.
    pub path: PathBuf,
    /// Maximum execution time before the tool is killed.
    pub timeout: Duration,
}

/// Availability information for a tool, returned by [`ToolRegistry::check_all`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Whether the tool was found.
    pub available: bool,
    /// Version string (first line of the version output), if available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    pub path: Option<PathBuf>,
}

/// Registry holding discovered tool configurations.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolConfig>,
}

impl ToolRegistry {
    /// Discover tools by searching `PATH` (or using overrides from config).
    ///
    /// For each known tool, if the [`mf_core::config::ToolsConfig`] supplies a
    /// custom path **and** that path exists, it is used directly. Otherwise
    /// [`which::which`] is used to locate the tool in `PATH`. Tools that are
    /// not found are omitted from the registry.
    pub fn discover(tools_config: &mf_core::config::ToolsConfig) -> Self {
        let timeout = Duration::from_secs(tools_config.timeout_secs);
        let mut tools = HashMap::new();

        for &name in KNOWN_TOOLS {
            let custom_path = match name {
                "exiftool" => tools_config.exiftool_path.as_deref(),
                "mediainfo" => tools_config.mediainfo_path.as_deref(),
                _ => None,
            };

            let resolved = match custom_path {
                Some(p) if p.exists() => Some(p.to_path_buf()),
                Some(p) => {
                    tracing::warn!(
                        tool = name,
                        path = %p.display(),
                        "configured tool path does not exist; searching PATH"
                    );
                    which::which(name).ok()
                }
                None => which::which(name).ok(),
            };

            match resolved {
                Some(path) => {
                    tracing::debug!(tool = name, path = %path.display(), "tool discovered");
                    tools.insert(
                        name.to_string(),
                        ToolConfig {
                            name: name.to_string(),
                            path,
                            timeout,
                        },
                    );
                }
                None => tracing::debug!(tool = name, "tool not found"),
            }
        }

        Self { tools }
    }

    /// Register a tool at an explicit path, bypassing discovery.
    pub fn with_tool(mut self, name: &str, path: PathBuf, timeout: Duration) -> Self {
        self.tools.insert(
            name.to_string(),
            ToolConfig {
                name: name.to_string(),
                path,
                timeout,
            },
        );
        self
    }

    /// Return a reference to the [`ToolConfig`] for the given tool, or an
    /// [`mf_core::Error::SourceUnavailable`] if the tool was not found during
    /// discovery.
    pub fn require(&self, name: &str) -> mf_core::Result<&ToolConfig> {
        self.tools.get(name).ok_or_else(|| {
            mf_core::Error::source_unavailable(
                name,
                format!("{name} not found; is it installed and in PATH?"),
            )
        })
    }

    /// Check all known tools and return availability information.
    pub fn check_all(&self) -> Vec<ToolInfo> {
        KNOWN_TOOLS
            .iter()
            .map(|&name| match self.tools.get(name) {
                Some(cfg) => ToolInfo {
                    name: name.to_string(),
                    available: true,
                    version: detect_version(name, &cfg.path),
                    path: Some(cfg.path.clone()),
                },
                None => ToolInfo {
                    name: name.to_string(),
                    available: false,
                    version: None,
                    path: None,
                },
            })
            .collect()
    }
}

/// Run the tool's version flag and return the first line of stdout.
fn detect_version(name: &str, path: &Path) -> Option<String> {
    let version_arg = match name {
        "exiftool" => "-ver",
        _ => "--Version",
    };

    let output = std::process::Command::new(path)
        .arg(version_arg)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_core::config::ToolsConfig;

    #[test]
    fn discover_with_default_config() {
        let cfg = ToolsConfig::default();
        let registry = ToolRegistry::discover(&cfg);
        // We cannot guarantee any tool is installed in CI,
        // but the call itself must not panic.
        let _ = registry.check_all();
    }

    #[test]
    fn require_missing_tool_returns_error() {
        let registry = ToolRegistry::default();
        let err = registry.require("exiftool").unwrap_err();
        assert_eq!(err.stage(), "metadata");
        assert!(err.to_string().contains("exiftool"));
    }

    #[test]
    fn check_all_returns_known_tools() {
        let registry = ToolRegistry::discover(&ToolsConfig::default());
        let infos = registry.check_all();
        let names: Vec<&str> = infos.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["exiftool", "mediainfo"]);
    }

    #[test]
    fn with_tool_registers_explicit_path() {
        let registry = ToolRegistry::default().with_tool(
            "mediainfo",
            PathBuf::from("/opt/mediainfo/bin/mediainfo"),
            Duration::from_secs(5),
        );
        let cfg = registry.require("mediainfo").unwrap();
        assert_eq!(cfg.path, PathBuf::from("/opt/mediainfo/bin/mediainfo"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn configured_path_is_used_when_present() {
        let fake = tempfile::NamedTempFile::new().unwrap();
        let cfg = ToolsConfig {
            exiftool_path: Some(fake.path().to_path_buf()),
            timeout_secs: 7,
            ..Default::default()
        };
        let registry = ToolRegistry::discover(&cfg);
        let tool = registry.require("exiftool").unwrap();
        assert_eq!(tool.path, fake.path());
        assert_eq!(tool.timeout, Duration::from_secs(7));
    }

    #[test]
    fn tool_info_serialization() {
        let info = ToolInfo {
            name: "mediainfo".to_string(),
            available: true,
            version: Some("MediaInfo Command line, v24.06".into()),
            path: Some(PathBuf::from("/usr/bin/mediainfo")),
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("mediainfo"));
        let back: ToolInfo = serde_json::from_str(&json).unwrap();
        assert!(back.available);
    }
}
