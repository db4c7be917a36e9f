//! Content-based MIME type sniffing.
//!
//! [`ContentSniffer`] owns an [`infer::Infer`] matcher. The driver builds one
//! per run and passes it to classification as a handle; nothing here is
//! process-global.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes inspected when no magic signature matches.
const TEXT_SAMPLE_LEN: usize = 8 * 1024;

/// Maps a file to a best-effort MIME type.
pub trait MimeSniffer: Send + Sync {
    /// Sniff `path`, returning `None` if the file cannot be read.
    fn sniff(&self, path: &Path) -> Option<String>;
}

/// Magic-number sniffer with a plain-text fallback.
pub struct ContentSniffer {
    matcher: infer::Infer,
}

impl std::fmt::Debug for ContentSniffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentSniffer").finish_non_exhaustive()
    }
}

impl Default for ContentSniffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSniffer {
    pub fn new() -> Self {
        Self {
            matcher: infer::Infer::new(),
        }
    }

    /// Sniff an in-memory prefix of a file.
    ///
    /// Signatures are tried first. Without a match, an empty buffer is
    /// `inode/x-empty`, UTF-8 without NUL bytes is `text/plain`, and anything
    /// else is `application/octet-stream`.
    pub fn sniff_bytes(&self, buf: &[u8]) -> String {
        if let Some(kind) = self.matcher.get(buf) {
            return kind.mime_type().to_string();
        }

        if buf.is_empty() {
            return "inode/x-empty".to_string();
        }

        if looks_like_text(buf) {
            "text/plain".to_string()
        } else {
            "application/octet-stream".to_string()
        }
    }
}

impl MimeSniffer for ContentSniffer {
    fn sniff(&self, path: &Path) -> Option<String> {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "sniffer could not open file");
                return None;
            }
        };

        let mut buf = Vec::with_capacity(TEXT_SAMPLE_LEN);
        if let Err(e) = file
            .by_ref()
            .take(TEXT_SAMPLE_LEN as u64)
            .read_to_end(&mut buf)
        {
            tracing::debug!(path = %path.display(), error = %e, "sniffer read failed");
            return None;
        }

        let mime = self.sniff_bytes(&buf);
        tracing::debug!(path = %path.display(), mime = %mime, "content sniffed");
        Some(mime)
    }
}

/// UTF-8 without NUL bytes. A multi-byte sequence cut off by the sample
/// boundary is tolerated.
fn looks_like_text(buf: &[u8]) -> bool {
    if buf.contains(&0) {
        return false;
    }
    match std::str::from_utf8(buf) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && buf.len() >= TEXT_SAMPLE_LEN,
    }
}
