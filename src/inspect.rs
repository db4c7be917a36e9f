//! Single-file inspection driver.
//!
//! One [`Inspector`] holds every collaborator for a run: the tag source,
//! the track source, the MIME sniffer and the digest engine. A run stats the
//! file, then fetches both documents and computes the digests concurrently.
//! The first failure aborts the run; nothing partial is returned.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mf_av::{
    ContentSniffer, ExifToolSource, MediaInfoSource, MimeSniffer, TagSource, ToolRegistry,
    TrackSource,
};
use mf_core::Error;
use mf_digest::DigestEngine;

use crate::config::Config;
use crate::record::MediaRecord;

pub struct Inspector {
    tags: Box<dyn TagSource>,
    tracks: Box<dyn TrackSource>,
    sniffer: Box<dyn MimeSniffer>,
    digests: DigestEngine,
}

impl Inspector {
    pub fn new(
        tags: Box<dyn TagSource>,
        tracks: Box<dyn TrackSource>,
        sniffer: Box<dyn MimeSniffer>,
        digests: DigestEngine,
    ) -> Self {
        Self {
            tags,
            tracks,
            sniffer,
            digests,
        }
    }

    /// Build the production collaborators from configuration.
    ///
    /// A tool missing from the registry is not an error here; the run fails
    /// with [`Error::SourceUnavailable`] when the tool is invoked, after the
    /// input file has been checked.
    pub fn from_config(config: &Config) -> mf_core::Result<Self> {
        let digests = DigestEngine::from_config(&config.digest)?;
        let registry = ToolRegistry::discover(&config.tools);
        let timeout = Duration::from_secs(config.tools.timeout_secs);

        let tags = ExifToolSource::from_registry(&registry).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "exiftool not discovered; relying on PATH at run time");
            ExifToolSource::new(PathBuf::from("exiftool"), timeout)
        });
        let tracks = MediaInfoSource::from_registry(&registry).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "mediainfo not discovered; relying on PATH at run time");
            MediaInfoSource::new(PathBuf::from("mediainfo"), timeout)
        });

        Ok(Self::new(
            Box::new(tags),
            Box::new(tracks),
            Box::new(ContentSniffer::new()),
            digests,
        ))
    }

    /// Inspect `path` and build its record.
    pub async fn inspect(&self, path: &Path) -> mf_core::Result<MediaRecord> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| Error::file_access(path, e))?;
        let size = metadata.len();
        tracing::debug!(path = %path.display(), size, "file stat");

        let (tags, tracks, digests) = tokio::try_join!(
            self.tags.fetch(path),
            self.tracks.fetch(path),
            self.scan(path),
        )?;
        tracing::debug!(
            tag_source = self.tags.name(),
            track_source = self.tracks.name(),
            digests = digests.len(),
            "metadata collected"
        );

        let classification = mf_fusion::classify(&tags, &tracks, || self.sniffer.sniff(path));

        Ok(MediaRecord::assemble(
            path,
            size,
            classification,
            digests,
            tags,
            tracks,
        ))
    }

    /// Run the digest scan on the blocking pool.
    ///
    /// Dropping the returned future (another stage failed first) stops the
    /// scan at its next chunk.
    async fn scan(&self, path: &Path) -> mf_core::Result<mf_digest::DigestSet> {
        let engine = self.digests.clone();
        let owned = path.to_path_buf();
        let cancel = Arc::new(AtomicBool::new(false));
        let _guard = CancelOnDrop(Arc::clone(&cancel));

        tokio::task::spawn_blocking(move || engine.digest_file_until(&owned, &cancel))
            .await
            .map_err(|e| Error::digest_io(path, std::io::Error::other(e)))?
    }
}

/// Raises the flag when the owning future goes away.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
