//! mediainfo-backed [`TrackSource`].
//!
//! Shells out to `mediainfo --Output=JSON <file>`. The output is kept as raw
//! JSON; the `media.track[]` list is read lazily through
//! [`mf_core::TrackDocument`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use mf_core::TrackDocument;

use super::{file_operand, TrackSource};
use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// A track source backed by the `mediainfo` CLI.
#[derive(Debug, Clone)]
pub struct MediaInfoSource {
    mediainfo_path: PathBuf,
    timeout: Duration,
}

impl MediaInfoSource {
    /// Create a new source using the given mediainfo path.
    pub fn new(mediainfo_path: PathBuf, timeout: Duration) -> Self {
        Self {
            mediainfo_path,
            timeout,
        }
    }

    /// Create a source from a discovered registry entry.
    pub fn from_registry(registry: &ToolRegistry) -> mf_core::Result<Self> {
        let tool = registry.require("mediainfo")?;
        Ok(Self::new(tool.path.clone(), tool.timeout))
    }
}

#[async_trait]
impl TrackSource for MediaInfoSource {
    fn name(&self) -> &'static str {
        "mediainfo"
    }

    async fn fetch(&self, path: &Path) -> mf_core::Result<TrackDocument> {
        let output = ToolCommand::new(self.mediainfo_path.clone())
            .arg("--Output=JSON")
            .arg(file_operand(path).as_os_str())
            .timeout(self.timeout)
            .execute()
            .await?;

        let doc = TrackDocument::from_json(self.name(), &output.stdout)?;
        tracing::debug!(
            path = %path.display(),
            tracks = doc.tracks().count(),
            "mediainfo tracks extracted"
        );
        Ok(doc)
    }
}
