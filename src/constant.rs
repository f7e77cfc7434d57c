//! Constants that pin down the digest and wire formats.
//!
//! Domain-separation tags keep leaf digests, sentinel digests and internal
//! digests from colliding across roles; the remaining constants define the
//! normative byte encoding of verification objects. Changing any value here
//! changes every digest and breaks interoperability with existing roots.

/// Prefix byte of the first hash input of a finite leaf:
/// `D(leaf) = H(LEAF_TAG || enc(key), value_bytes)`.
pub const LEAF_TAG: u8 = 0x00;

/// Both hash inputs of the sentinel leaf:
/// `D(sentinel) = H(SENTINEL_TAG, SENTINEL_TAG)`.
pub const SENTINEL_TAG: &[u8] = &[0x01];

/// Version byte leading every encoded verification object.
pub const VO_WIRE_VERSION: u8 = 0x01;

/// Status byte of a membership verification object.
pub const VO_STATUS_FOUND: u8 = 0x00;
/// Status byte of an absence verification object.
pub const VO_STATUS_ABSENT: u8 = 0x01;

/// Side tag of a path step that descended into the left child.
pub const SIDE_TAG_LEFT: u8 = 0x00;
/// Side tag of a path step that descended into the right child.
pub const SIDE_TAG_RIGHT: u8 = 0x01;

/// Leaf-kind tag of a finite neighbor witness (key and value follow).
pub const LEAF_KIND_FINITE: u8 = 0x00;
/// Leaf-kind tag of the sentinel neighbor witness (no key, no value).
pub const LEAF_KIND_SENTINEL: u8 = 0x01;

/// Presence tag of an omitted left neighbor (the key precedes the map).
pub const NEIGHBOR_ABSENT: u8 = 0x00;
/// Presence tag of a present left neighbor.
pub const NEIGHBOR_PRESENT: u8 = 0x01;
