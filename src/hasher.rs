//! The hash adapter: maps an algorithm name (or a custom combiner) to the
//! two-argument hash `H(a, b)` that every digest in a tree is built from.
//!
//! Named algorithms hash the concatenation `a || b` with the named digest
//! function. A custom adapter receives both arguments unmodified and may
//! combine them however it likes, as long as it is deterministic and
//! reports its output length truthfully. All nodes of a tree share one
//! adapter; two trees can be meaningfully compared only when their
//! adapters produce identical digests on identical inputs.

use crate::types::Digest;
use blake2::{Blake2b512, Blake2s256};
use once_cell::sync::Lazy;
use sha1::Sha1;
use sha2::{Digest as _, Sha224, Sha256, Sha384, Sha512};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// The supported named hash algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum HashAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Blake2b,
    Blake2s,
    Blake3,
}

/// Registry of algorithm names accepted by [`HashAlgorithm::from_str`].
static ALGORITHMS: Lazy<BTreeMap<&'static str, HashAlgorithm>> = Lazy::new(|| {
    BTreeMap::from([
        ("sha1", HashAlgorithm::Sha1),
        ("sha224", HashAlgorithm::Sha224),
        ("sha256", HashAlgorithm::Sha256),
        ("sha384", HashAlgorithm::Sha384),
        ("sha512", HashAlgorithm::Sha512),
        ("blake2b", HashAlgorithm::Blake2b),
        ("blake2s", HashAlgorithm::Blake2s),
        ("blake3", HashAlgorithm::Blake3),
    ])
});

/// The name passed to [`HashAlgorithm::from_str`] is not a supported
/// algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hash algorithm: {0:?}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ALGORITHMS
            .get(name)
            .copied()
            .ok_or_else(|| UnknownAlgorithm(name.to_string()))
    }
}

impl HashAlgorithm {
    /// The registry name of this algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Blake2b => "blake2b",
            Self::Blake2s => "blake2s",
            Self::Blake3 => "blake3",
        }
    }

    /// Output length of this algorithm in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha224 => 28,
            Self::Sha256 | Self::Blake2s | Self::Blake3 => 32,
            Self::Sha384 => 48,
            Self::Sha512 | Self::Blake2b => 64,
        }
    }

    fn combine(&self, a: &[u8], b: &[u8]) -> Vec<u8> {
        fn concat_hash<D: sha2::Digest>(a: &[u8], b: &[u8]) -> Vec<u8> {
            D::new().chain_update(a).chain_update(b).finalize().to_vec()
        }
        match self {
            Self::Sha1 => concat_hash::<Sha1>(a, b),
            Self::Sha224 => concat_hash::<Sha224>(a, b),
            Self::Sha256 => concat_hash::<Sha256>(a, b),
            Self::Sha384 => concat_hash::<Sha384>(a, b),
            Self::Sha512 => concat_hash::<Sha512>(a, b),
            Self::Blake2b => concat_hash::<Blake2b512>(a, b),
            Self::Blake2s => concat_hash::<Blake2s256>(a, b),
            Self::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(a);
                hasher.update(b);
                hasher.finalize().as_bytes().to_vec()
            }
        }
    }
}

type CombineFn = dyn Fn(&[u8], &[u8]) -> Vec<u8> + Send + Sync;

#[derive(Clone)]
enum Adapter {
    Named(HashAlgorithm),
    Custom {
        combine: Arc<CombineFn>,
        digest_len: usize,
    },
}

/// The dual-argument hasher shared by every node of a tree.
///
/// Pure and stateless: `combine(a, b)` depends only on its inputs.
#[derive(Clone)]
pub struct NodeHasher {
    adapter: Adapter,
}

impl NodeHasher {
    /// Adapter for a named algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            adapter: Adapter::Named(algorithm),
        }
    }

    /// Adapter around a user-supplied combiner. `digest_len` must match
    /// the combiner's output length on every input.
    pub fn custom<F>(combine: F, digest_len: usize) -> Self
    where
        F: Fn(&[u8], &[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        Self {
            adapter: Adapter::Custom {
                combine: Arc::new(combine),
                digest_len,
            },
        }
    }

    /// `H(a, b)`.
    pub fn combine(&self, a: &[u8], b: &[u8]) -> Digest {
        let bytes = match &self.adapter {
            Adapter::Named(algorithm) => algorithm.combine(a, b),
            Adapter::Custom { combine, .. } => combine(a, b),
        };
        Digest(bytes)
    }

    /// Output length of this adapter in bytes.
    pub fn digest_len(&self) -> usize {
        match &self.adapter {
            Adapter::Named(algorithm) => algorithm.digest_len(),
            Adapter::Custom { digest_len, .. } => *digest_len,
        }
    }
}

impl Default for NodeHasher {
    fn default() -> Self {
        Self::new(HashAlgorithm::Sha256)
    }
}

impl fmt::Debug for NodeHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.adapter {
            Adapter::Named(algorithm) => write!(f, "NodeHasher({})", algorithm.name()),
            Adapter::Custom { digest_len, .. } => {
                write!(f, "NodeHasher(custom, {digest_len} bytes)")
            }
        }
    }
}
