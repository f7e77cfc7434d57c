//! The verification object and its normative wire encoding.
//!
//! Implementations must be bit-identical on the wire to interoperate: a
//! version byte, a status byte, then length-prefixed (u32 big-endian) key
//! and value fields, one-byte side/kind/presence tags, and digests at the
//! adapter's fixed output size. The types also derive serde traits for
//! transport through self-describing formats; the byte codec is the
//! interop format.

use crate::constant::{
    LEAF_KIND_FINITE, LEAF_KIND_SENTINEL, NEIGHBOR_ABSENT, NEIGHBOR_PRESENT, SIDE_TAG_LEFT,
    SIDE_TAG_RIGHT, VO_STATUS_ABSENT, VO_STATUS_FOUND, VO_WIRE_VERSION,
};
use crate::proof::ProofError;
use crate::types::Digest;
use serde::{Deserialize, Serialize};

/// Which child a descent step took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The step descended into the left child.
    Left,
    /// The step descended into the right child.
    Right,
}

/// One root-to-leaf descent step: the side taken, the encoded key of the
/// internal node, and the digest of the child *not* taken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Side the descent took at this node.
    pub side: Side,
    /// Canonical encoding of the internal node's key.
    pub node_key: Vec<u8>,
    /// Digest of the opposite child.
    pub sibling_digest: Digest,
}

/// The leaf at the end of a neighbor path: a finite entry, or the
/// sentinel (which carries no key and no value).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafWitness {
    /// A stored entry, with its encoded key and value bytes.
    Finite {
        /// Canonical encoding of the leaf key.
        key: Vec<u8>,
        /// Canonical value bytes.
        value: Vec<u8>,
    },
    /// The `+inf` leaf.
    Sentinel,
}

/// A membership-style sub-proof for one leaf adjacent to an absent key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborProof {
    /// The witnessed leaf.
    pub leaf: LeafWitness,
    /// Its root-to-leaf path.
    pub path: Vec<PathStep>,
}

/// A verification object: proof of membership or absence of one key,
/// checkable against a trusted root digest pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationObject {
    /// The key is present and maps to `value`.
    Found {
        /// Canonical encoding of the looked-up key.
        search_key: Vec<u8>,
        /// Canonical value bytes stored under the key.
        value: Vec<u8>,
        /// Root-to-leaf path of the entry's leaf.
        path: Vec<PathStep>,
    },
    /// The key is not present, witnessed by the two leaves that surround
    /// it in key order.
    Absent {
        /// Canonical encoding of the looked-up key.
        search_key: Vec<u8>,
        /// Proof for the greatest stored key below the search key, or
        /// `None` when the search key precedes the whole map.
        left: Option<NeighborProof>,
        /// Proof for the least leaf above the search key; the sentinel
        /// when the search key follows the whole map.
        right: NeighborProof,
    },
}

impl VerificationObject {
    /// The encoded key this object proves something about.
    pub fn search_key(&self) -> &[u8] {
        match self {
            Self::Found { search_key, .. } | Self::Absent { search_key, .. } => search_key,
        }
    }

    /// Encodes to the normative wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![VO_WIRE_VERSION];
        match self {
            Self::Found {
                search_key,
                value,
                path,
            } => {
                out.push(VO_STATUS_FOUND);
                write_bytes(&mut out, search_key);
                write_bytes(&mut out, value);
                write_path(&mut out, path);
            }
            Self::Absent {
                search_key,
                left,
                right,
            } => {
                out.push(VO_STATUS_ABSENT);
                write_bytes(&mut out, search_key);
                match left {
                    None => out.push(NEIGHBOR_ABSENT),
                    Some(neighbor) => {
                        out.push(NEIGHBOR_PRESENT);
                        write_neighbor(&mut out, neighbor);
                    }
                }
                write_neighbor(&mut out, right);
            }
        }
        out
    }

    /// Decodes the normative wire format. `digest_len` is the adapter's
    /// output size; sibling digests are fixed-width on the wire.
    pub fn from_bytes(bytes: &[u8], digest_len: usize) -> Result<Self, ProofError> {
        let mut reader = ByteReader::new(bytes);
        let version = reader.read_u8()?;
        if version != VO_WIRE_VERSION {
            return Err(ProofError::UnsupportedVersion(version));
        }
        let vo = match reader.read_u8()? {
            VO_STATUS_FOUND => {
                let search_key = reader.read_vec()?;
                let value = reader.read_vec()?;
                let path = read_path(&mut reader, digest_len)?;
                Self::Found {
                    search_key,
                    value,
                    path,
                }
            }
            VO_STATUS_ABSENT => {
                let search_key = reader.read_vec()?;
                let left = match reader.read_u8()? {
                    NEIGHBOR_ABSENT => None,
                    NEIGHBOR_PRESENT => Some(read_neighbor(&mut reader, digest_len)?),
                    value => {
                        return Err(ProofError::InvalidTag {
                            field: "neighbor presence",
                            value,
                        })
                    }
                };
                let right = read_neighbor(&mut reader, digest_len)?;
                Self::Absent {
                    search_key,
                    left,
                    right,
                }
            }
            value => {
                return Err(ProofError::InvalidTag {
                    field: "status",
                    value,
                })
            }
        };
        reader.finish()?;
        Ok(vo)
    }
}

fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

fn write_path(out: &mut Vec<u8>, path: &[PathStep]) {
    out.extend_from_slice(&(path.len() as u32).to_be_bytes());
    for step in path {
        out.push(match step.side {
            Side::Left => SIDE_TAG_LEFT,
            Side::Right => SIDE_TAG_RIGHT,
        });
        write_bytes(out, &step.node_key);
        out.extend_from_slice(&step.sibling_digest);
    }
}

fn write_neighbor(out: &mut Vec<u8>, neighbor: &NeighborProof) {
    match &neighbor.leaf {
        LeafWitness::Finite { key, value } => {
            out.push(LEAF_KIND_FINITE);
            write_bytes(out, key);
            write_bytes(out, value);
        }
        LeafWitness::Sentinel => out.push(LEAF_KIND_SENTINEL),
    }
    write_path(out, &neighbor.path);
}

fn read_path(reader: &mut ByteReader<'_>, digest_len: usize) -> Result<Vec<PathStep>, ProofError> {
    let count = reader.read_u32()? as usize;
    let mut path = Vec::new();
    for _ in 0..count {
        let side = match reader.read_u8()? {
            SIDE_TAG_LEFT => Side::Left,
            SIDE_TAG_RIGHT => Side::Right,
            value => return Err(ProofError::InvalidTag {
                field: "side",
                value,
            }),
        };
        let node_key = reader.read_vec()?;
        let sibling_digest = Digest(reader.take(digest_len)?.to_vec());
        path.push(PathStep {
            side,
            node_key,
            sibling_digest,
        });
    }
    Ok(path)
}

fn read_neighbor(
    reader: &mut ByteReader<'_>,
    digest_len: usize,
) -> Result<NeighborProof, ProofError> {
    let leaf = match reader.read_u8()? {
        LEAF_KIND_FINITE => LeafWitness::Finite {
            key: reader.read_vec()?,
            value: reader.read_vec()?,
        },
        LEAF_KIND_SENTINEL => LeafWitness::Sentinel,
        value => {
            return Err(ProofError::InvalidTag {
                field: "leaf kind",
                value,
            })
        }
    };
    let path = read_path(reader, digest_len)?;
    Ok(NeighborProof { leaf, path })
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], ProofError> {
        let end = self.pos.checked_add(count).ok_or(ProofError::Truncated)?;
        if end > self.bytes.len() {
            return Err(ProofError::Truncated);
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, ProofError> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, ProofError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_vec(&mut self) -> Result<Vec<u8>, ProofError> {
        let len = self.read_u32()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    fn finish(self) -> Result<(), ProofError> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(ProofError::TrailingBytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_found() -> VerificationObject {
        VerificationObject::Found {
            search_key: vec![0, 0, 0, 7],
            value: b"\"7\"".to_vec(),
            path: vec![
                PathStep {
                    side: Side::Right,
                    node_key: vec![0, 0, 0, 5],
                    sibling_digest: Digest(vec![0xaa; 4]),
                },
                PathStep {
                    side: Side::Left,
                    node_key: vec![0, 0, 0, 8],
                    sibling_digest: Digest(vec![0xbb; 4]),
                },
            ],
        }
    }

    fn sample_absent() -> VerificationObject {
        VerificationObject::Absent {
            search_key: vec![0, 0, 0, 6],
            left: Some(NeighborProof {
                leaf: LeafWitness::Finite {
                    key: vec![0, 0, 0, 5],
                    value: b"\"5\"".to_vec(),
                },
                path: vec![PathStep {
                    side: Side::Left,
                    node_key: vec![0, 0, 0, 5],
                    sibling_digest: Digest(vec![0xcc; 4]),
                }],
            }),
            right: NeighborProof {
                leaf: LeafWitness::Sentinel,
                path: vec![PathStep {
                    side: Side::Right,
                    node_key: vec![0, 0, 0, 5],
                    sibling_digest: Digest(vec![0xdd; 4]),
                }],
            },
        }
    }

    #[test]
    fn wire_round_trip() {
        for vo in [sample_found(), sample_absent()] {
            let bytes = vo.to_bytes();
            assert_eq!(VerificationObject::from_bytes(&bytes, 4).unwrap(), vo);
        }
    }

    #[test]
    fn wire_layout_is_stable() {
        let bytes = sample_found().to_bytes();
        assert_eq!(bytes[0], VO_WIRE_VERSION);
        assert_eq!(bytes[1], VO_STATUS_FOUND);
        // search key length prefix
        assert_eq!(&bytes[2..6], &[0, 0, 0, 4]);
        assert_eq!(&bytes[6..10], &[0, 0, 0, 7]);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = sample_found().to_bytes();
        bytes[0] = 0x7f;
        assert_eq!(
            VerificationObject::from_bytes(&bytes, 4),
            Err(ProofError::UnsupportedVersion(0x7f))
        );
    }

    #[test]
    fn rejects_bad_tags() {
        let mut bytes = sample_found().to_bytes();
        bytes[1] = 0x44;
        assert!(matches!(
            VerificationObject::from_bytes(&bytes, 4),
            Err(ProofError::InvalidTag {
                field: "status",
                ..
            })
        ));
    }

    #[test]
    fn rejects_truncation_and_trailing_bytes() {
        let bytes = sample_absent().to_bytes();
        for cut in 0..bytes.len() {
            assert!(
                VerificationObject::from_bytes(&bytes[..cut], 4).is_err(),
                "prefix of {cut} bytes decoded"
            );
        }
        let mut extended = bytes;
        extended.push(0);
        assert_eq!(
            VerificationObject::from_bytes(&extended, 4),
            Err(ProofError::TrailingBytes)
        );
    }

    #[test]
    fn digest_width_comes_from_the_adapter() {
        let bytes = sample_found().to_bytes();
        // a wider digest expectation starves the reader
        assert!(VerificationObject::from_bytes(&bytes, 32).is_err());
    }
}
