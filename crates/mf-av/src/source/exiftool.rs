//! exiftool-backed [`TagSource`].
//!
//! Shells out to `exiftool -j <file>` and keeps the first object of the
//! emitted array verbatim.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use mf_core::TagDocument;

use super::{file_operand, TagSource};
use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// A tag source backed by the `exiftool` CLI.
#[derive(Debug, Clone)]
pub struct ExifToolSource {
    exiftool_path: PathBuf,
    timeout: Duration,
}

impl ExifToolSource {
    /// Create a new source using the given exiftool path.
    pub fn new(exiftool_path: PathBuf, timeout: Duration) -> Self {
        Self {
            exiftool_path,
            timeout,
        }
    }

    /// Create a source from a discovered registry entry.
    pub fn from_registry(registry: &ToolRegistry) -> mf_core::Result<Self> {
        let tool = registry.require("exiftool")?;
        Ok(Self::new(tool.path.clone(), tool.timeout))
    }
}

#[async_trait]
impl TagSource for ExifToolSource {
    fn name(&self) -> &'static str {
        "exiftool"
    }

    async fn fetch(&self, path: &Path) -> mf_core::Result<TagDocument> {
        let output = ToolCommand::new(self.exiftool_path.clone())
            .arg("-j")
            .arg(file_operand(path).as_os_str())
            .timeout(self.timeout)
            .execute()
            .await?;

        let doc = TagDocument::from_json(self.name(), &output.stdout)?;
        tracing::debug!(
            path = %path.display(),
            fields = doc.fields().len(),
            "exiftool tags extracted"
        );
        Ok(doc)
    }
}
