//! Shared value types: digests, root digests, node colors, map entries and
//! change-set entries.

use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node digest: the output of the tree's hash adapter. Its length is
/// fixed per tree (the adapter's output size) but varies across adapters.
#[derive(Clone, Default, PartialEq, Eq, Hash, Deref, DerefMut, Serialize, Deserialize)]
pub struct Digest(pub Vec<u8>);

impl Digest {
    /// Digest bytes as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(&self.0))
    }
}

/// The root digest pair `(D(left(root)), D(right(root)))`.
///
/// The root is exposed as a pair rather than a single hash so a verifier
/// can replay the final combination step of a verification object without
/// being told the root's internal key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RootDigest(pub Digest, pub Digest);

impl fmt::Display for RootDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl fmt::Debug for RootDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RootDigest({}, {})", self.0, self.1)
    }
}

/// Red-black node color. Leaves carry no color field and count as
/// [`Color::Black`] for balance accounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Red internal node.
    Red,
    /// Black internal node (the root is always black).
    Black,
}

/// A key-value pair surfaced by queries and change sets. The value is the
/// canonical byte encoding the caller supplied; the tree never interprets
/// it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<K> {
    /// The entry's key.
    pub key: K,
    /// Canonical value bytes.
    pub value: Vec<u8>,
}

/// Which tree a change-set entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeOrigin {
    /// The entry is present in the tree the change set was requested from,
    /// and differs or is absent in the other tree.
    Source,
    /// The entry is present in the other tree, and differs or is absent in
    /// the requesting tree.
    Destination,
}

/// One element of a change set: an entry together with the tree it came
/// from. A key whose value differs between the trees produces two entries,
/// `Source` first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSetEntry<K> {
    /// Which tree holds this version of the entry.
    pub origin: ChangeOrigin,
    /// The key and the value it maps to in the originating tree.
    pub entry: Entry<K>,
}
