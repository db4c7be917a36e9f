//! Single-pass digest scan.
//!
//! The file is read once, sequentially. Each chunk is handed to every
//! configured accumulator before the next chunk is read, and no accumulator
//! is finalized until the reader reports end of stream.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use digest::DynDigest;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;

/// Lowercase hex digests keyed by algorithm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigestSet(BTreeMap<Algorithm, String>);

impl DigestSet {
    /// Hex digest for `algo`, if it was computed.
    pub fn get(&self, algo: Algorithm) -> Option<&str> {
        self.0.get(&algo).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in algorithm declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &str)> {
        self.0.iter().map(|(a, h)| (*a, h.as_str()))
    }
}

/// Streams input once through a fixed set of hash accumulators.
#[derive(Debug, Clone)]
pub struct DigestEngine {
    algorithms: Vec<Algorithm>,
    buffer_size: usize,
    parallel: bool,
}

impl Default for DigestEngine {
    fn default() -> Self {
        Self {
            algorithms: Algorithm::ALL.to_vec(),
            buffer_size: mf_core::config::DEFAULT_DIGEST_BUFFER,
            parallel: false,
        }
    }
}

impl DigestEngine {
    /// Create an engine for the given algorithms.
    ///
    /// Duplicates are collapsed. An empty list is a configuration error.
    pub fn new(algorithms: impl IntoIterator<Item = Algorithm>) -> mf_core::Result<Self> {
        let mut unique: Vec<Algorithm> = Vec::new();
        for algo in algorithms {
            if !unique.contains(&algo) {
                unique.push(algo);
            }
        }

        if unique.is_empty() {
            return Err(mf_core::Error::Config(
                "at least one digest algorithm is required".into(),
            ));
        }

        Ok(Self {
            algorithms: unique,
            ..Self::default()
        })
    }

    /// Build an engine from the `[digest]` config section.
    pub fn from_config(cfg: &mf_core::config::DigestConfig) -> mf_core::Result<Self> {
        if cfg.buffer_size == 0 {
            return Err(mf_core::Error::Config(
                "digest.buffer_size must be greater than 0".into(),
            ));
        }

        Ok(Self::new(Algorithm::parse_list(&cfg.algorithms)?)?
            .buffer_size(cfg.buffer_size)
            .parallel(cfg.parallel))
    }

    /// Set the read chunk size (clamped to at least one byte).
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Update the accumulators for each chunk on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The configured algorithms, in first-seen order.
    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    /// Digest a file in a single sequential read pass.
    ///
    /// # Errors
    ///
    /// Returns [`mf_core::Error::DigestIo`] if the file cannot be opened or a
    /// read fails mid-stream. No partial set is returned.
    pub fn digest_file(&self, path: &Path) -> mf_core::Result<DigestSet> {
        self.digest_file_until(path, &AtomicBool::new(false))
    }

    /// Like [`DigestEngine::digest_file`], but stops before the next chunk
    /// once `cancel` is set.
    pub fn digest_file_until(&self, path: &Path, cancel: &AtomicBool) -> mf_core::Result<DigestSet> {
        let file = File::open(path).map_err(|e| mf_core::Error::digest_io(path, e))?;
        let set = self
            .digest_reader_until(file, cancel)
            .map_err(|e| mf_core::Error::digest_io(path, e))?;

        tracing::debug!(
            path = %path.display(),
            algorithms = set.len(),
            "digest scan complete"
        );
        Ok(set)
    }

    /// Digest everything `reader` yields, reading it exactly once.
    pub fn digest_reader<R: Read>(&self, reader: R) -> io::Result<DigestSet> {
        self.digest_reader_until(reader, &AtomicBool::new(false))
    }

    /// Digest `reader`, checking `cancel` before every chunk.
    ///
    /// A cancelled scan returns an error and finalizes nothing.
    pub fn digest_reader_until<R: Read>(
        &self,
        mut reader: R,
        cancel: &AtomicBool,
    ) -> io::Result<DigestSet> {
        let mut hashers: Vec<(Algorithm, Box<dyn DynDigest + Send>)> = self
            .algorithms
            .iter()
            .map(|&a| (a, a.hasher()))
            .collect();
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            if cancel.load(Ordering::Relaxed) {
                return Err(io::Error::other("digest scan cancelled"));
            }

            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let chunk = &buffer[..n];

            if self.parallel {
                hashers.par_iter_mut().for_each(|(_, h)| h.update(chunk));
            } else {
                for (_, h) in hashers.iter_mut() {
                    h.update(chunk);
                }
            }
        }

        let digests = hashers
            .into_iter()
            .map(|(algo, h)| (algo, hex::encode(h.finalize())))
            .collect();

        Ok(DigestSet(digests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest::Digest;
    use std::io::Write;

    /// Reader that yields `ok_bytes` and then fails.
    struct FailingReader {
        remaining: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
            }
            let n = buf.len().min(self.remaining);
            buf[..n].fill(0xAB);
            self.remaining -= n;
            Ok(n)
        }
    }

    fn reference(algo: Algorithm, data: &[u8]) -> String {
        match algo {
            Algorithm::Md5 => hex::encode(md5::Md5::digest(data)),
            Algorithm::Sha1 => hex::encode(sha1::Sha1::digest(data)),
            Algorithm::Sha256 => hex::encode(sha2::Sha256::digest(data)),
            Algorithm::Sha512 => hex::encode(sha2::Sha512::digest(data)),
            Algorithm::Sha3_256 => hex::encode(sha3::Sha3_256::digest(data)),
            Algorithm::Sha3_512 => hex::encode(sha3::Sha3_512::digest(data)),
            Algorithm::Blake2b256 => {
                hex::encode(blake2::Blake2b::<blake2::digest::consts::U32>::digest(data))
            }
            Algorithm::Blake2b512 => hex::encode(blake2::Blake2b512::digest(data)),
        }
    }

    fn sample_data() -> Vec<u8> {
        (0..200_000u32).map(|i| (i * 31 % 251) as u8).collect()
    }

    #[test]
    fn known_vectors_for_abc() {
        let set = DigestEngine::default().digest_reader(&b"abc"[..]).unwrap();
        assert_eq!(
            set.get(Algorithm::Md5),
            Some("900150983cd24fb0d6963f7d28e17f72")
        );
        assert_eq!(
            set.get(Algorithm::Sha1),
            Some("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
        assert_eq!(
            set.get(Algorithm::Sha256),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn empty_input_still_yields_every_digest() {
        let set = DigestEngine::default().digest_reader(io::empty()).unwrap();
        assert_eq!(set.len(), Algorithm::ALL.len());
        assert_eq!(
            set.get(Algorithm::Md5),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
        assert_eq!(
            set.get(Algorithm::Sha256),
            Some("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn matches_reference_hashes_across_chunk_boundaries() {
        let data = sample_data();
        let engine = DigestEngine::default().buffer_size(4093);
        let set = engine.digest_reader(data.as_slice()).unwrap();

        assert_eq!(set.len(), Algorithm::ALL.len());
        for algo in Algorithm::ALL {
            let hex = set.get(algo).unwrap();
            assert_eq!(hex, reference(algo, &data), "{algo}");
            assert_eq!(hex.len(), algo.output_len() * 2);
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn parallel_scan_matches_sequential() {
        let data = sample_data();
        let sequential = DigestEngine::default().digest_reader(data.as_slice()).unwrap();
        let parallel = DigestEngine::default()
            .parallel(true)
            .buffer_size(1000)
            .digest_reader(data.as_slice())
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn mid_stream_failure_returns_no_digests() {
        let result = DigestEngine::default()
            .buffer_size(1024)
            .digest_reader(FailingReader { remaining: 10_000 });
        assert!(result.is_err());
    }

    /// Endless zero stream that raises `cancel` after `after` reads.
    struct CancellingReader<'a> {
        cancel: &'a AtomicBool,
        after: usize,
        reads: usize,
    }

    impl Read for CancellingReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.reads += 1;
            if self.reads == self.after {
                self.cancel.store(true, Ordering::Relaxed);
            }
            buf.fill(0);
            Ok(buf.len())
        }
    }

    #[test]
    fn cancelled_before_start_reads_nothing() {
        let cancel = AtomicBool::new(true);
        let err = DigestEngine::default()
            .digest_reader_until(FailingReader { remaining: 0 }, &cancel)
            .unwrap_err();
        assert!(err.to_string().contains("cancelled"));
    }

    #[test]
    fn cancel_stops_endless_scan() {
        let cancel = AtomicBool::new(false);
        let mut reader = CancellingReader {
            cancel: &cancel,
            after: 3,
            reads: 0,
        };
        let err = DigestEngine::default()
            .buffer_size(1024)
            .digest_reader_until(&mut reader, &cancel)
            .unwrap_err();
        assert!(err.to_string().contains("cancelled"));
        assert_eq!(reader.reads, 3);
    }

    #[test]
    fn cancelled_file_scan_is_digest_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();
        file.flush().unwrap();

        let err = DigestEngine::default()
            .digest_file_until(file.path(), &AtomicBool::new(true))
            .unwrap_err();
        assert_eq!(err.stage(), "digest");
    }

    #[test]
    fn subset_only_contains_requested() {
        let engine = DigestEngine::new([Algorithm::Sha256, Algorithm::Md5, Algorithm::Sha256]).unwrap();
        assert_eq!(engine.algorithms(), &[Algorithm::Sha256, Algorithm::Md5]);
        let set = engine.digest_reader(&b"abc"[..]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get(Algorithm::Sha1).is_none());
    }

    #[test]
    fn empty_algorithm_list_rejected() {
        let err = DigestEngine::new(Vec::new()).unwrap_err();
        assert_eq!(err.stage(), "config");
    }

    #[test]
    fn from_config_rejects_zero_buffer() {
        let cfg = mf_core::config::DigestConfig {
            buffer_size: 0,
            ..Default::default()
        };
        assert!(DigestEngine::from_config(&cfg).is_err());
    }

    #[test]
    fn from_config_parses_names() {
        let cfg = mf_core::config::DigestConfig {
            algorithms: vec!["sha3-512".into(), "blake2b-256".into()],
            ..Default::default()
        };
        let engine = DigestEngine::from_config(&cfg).unwrap();
        assert_eq!(
            engine.algorithms(),
            &[Algorithm::Sha3_512, Algorithm::Blake2b256]
        );
    }

    #[test]
    fn digest_file_matches_reader_and_is_idempotent() {
        let data = sample_data();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        let engine = DigestEngine::default();
        let first = engine.digest_file(file.path()).unwrap();
        let second = engine.digest_file(file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, engine.digest_reader(data.as_slice()).unwrap());
    }

    #[test]
    fn digest_missing_file_is_digest_error() {
        let err = DigestEngine::default()
            .digest_file(Path::new("/nonexistent/file_xyz_12345.bin"))
            .unwrap_err();
        assert!(matches!(err, mf_core::Error::DigestIo { .. }));
    }

    #[test]
    fn digest_set_serializes_with_canonical_keys() {
        let set = DigestEngine::new([Algorithm::Md5, Algorithm::Sha3_256])
            .unwrap()
            .digest_reader(io::empty())
            .unwrap();
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.get("md5").is_some());
        assert!(json.get("sha3-256").is_some());
    }
}
