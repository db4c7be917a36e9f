//! Supported digest algorithms.

use std::fmt;
use std::str::FromStr;

use digest::DynDigest;
use serde::{Deserialize, Serialize};

type Blake2b256 = blake2::Blake2b<blake2::digest::consts::U32>;

/// A content digest algorithm.
///
/// Variants are declared in output order; a [`crate::DigestSet`] iterates in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "md5")]
    Md5,
    #[serde(rename = "sha1")]
    Sha1,
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha512")]
    Sha512,
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha3-512")]
    Sha3_512,
    #[serde(rename = "blake2b-256")]
    Blake2b256,
    #[serde(rename = "blake2b-512")]
    Blake2b512,
}

impl Algorithm {
    /// Every supported algorithm.
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha512,
        Algorithm::Sha3_256,
        Algorithm::Sha3_512,
        Algorithm::Blake2b256,
        Algorithm::Blake2b512,
    ];

    /// Canonical lowercase name, used as the key in emitted records.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
            Algorithm::Sha3_256 => "sha3-256",
            Algorithm::Sha3_512 => "sha3-512",
            Algorithm::Blake2b256 => "blake2b-256",
            Algorithm::Blake2b512 => "blake2b-512",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            Algorithm::Md5 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha256 | Algorithm::Sha3_256 | Algorithm::Blake2b256 => 32,
            Algorithm::Sha512 | Algorithm::Sha3_512 | Algorithm::Blake2b512 => 64,
        }
    }

    /// A fresh accumulator for this algorithm.
    pub(crate) fn hasher(self) -> Box<dyn DynDigest + Send> {
        match self {
            Algorithm::Md5 => Box::new(md5::Md5::default()),
            Algorithm::Sha1 => Box::new(sha1::Sha1::default()),
            Algorithm::Sha256 => Box::new(sha2::Sha256::default()),
            Algorithm::Sha512 => Box::new(sha2::Sha512::default()),
            Algorithm::Sha3_256 => Box::new(sha3::Sha3_256::default()),
            Algorithm::Sha3_512 => Box::new(sha3::Sha3_512::default()),
            Algorithm::Blake2b256 => Box::new(Blake2b256::default()),
            Algorithm::Blake2b512 => Box::new(blake2::Blake2b512::default()),
        }
    }

    /// Parse a list of algorithm names, rejecting unknown names.
    ///
    /// An empty list selects [`Algorithm::ALL`]. Duplicates are collapsed
    /// while keeping first-seen order.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> mf_core::Result<Vec<Algorithm>> {
        if names.is_empty() {
            return Ok(Algorithm::ALL.to_vec());
        }

        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let algo: Algorithm = name.as_ref().parse()?;
            if !out.contains(&algo) {
                out.push(algo);
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = mf_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| mf_core::Error::Config(format!("unknown digest algorithm: {s}")))
    }
}
