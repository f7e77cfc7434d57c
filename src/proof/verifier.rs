//! Stand-alone verification of verification objects.
//!
//! The verifier holds no tree: only the trusted root digest pair and the
//! hash adapter. It rebuilds the leaf digest from the claimed payload,
//! folds the path bottom-up into a digest pair, and accepts only when the
//! final pair equals the trusted root and every step is consistent with
//! the descent rule (`key <= node_key` goes left) on canonical encodings.
//! For absence it additionally demands that the two witnessed leaves
//! straddle the search key and are adjacent in key order, which is a
//! purely structural property of their two paths.

use crate::constant::{LEAF_TAG, SENTINEL_TAG};
use crate::hasher::NodeHasher;
use crate::proof::vo::{LeafWitness, NeighborProof, PathStep, Side, VerificationObject};
use crate::types::{Digest, RootDigest};

/// Checks `vo` against a trusted root digest pair. Returns `false` on any
/// inconsistency; never errors.
pub fn verify(trusted: &RootDigest, vo: &VerificationObject, hasher: &NodeHasher) -> bool {
    match vo {
        VerificationObject::Found {
            search_key,
            value,
            path,
        } => {
            let leaf = leaf_digest(hasher, search_key, value);
            path_commits_leaf(trusted, hasher, &leaf, Some(search_key), path)
        }
        VerificationObject::Absent {
            search_key,
            left,
            right,
        } => verify_absent(trusted, hasher, search_key, left.as_ref(), right),
    }
}

fn leaf_digest(hasher: &NodeHasher, key: &[u8], value: &[u8]) -> Digest {
    let mut tagged = Vec::with_capacity(1 + key.len());
    tagged.push(LEAF_TAG);
    tagged.extend_from_slice(key);
    hasher.combine(&tagged, value)
}

fn sentinel_digest(hasher: &NodeHasher) -> Digest {
    hasher.combine(SENTINEL_TAG, SENTINEL_TAG)
}

/// Folds `path` from the leaf up and compares the resulting pair against
/// the trusted root. `search_key` drives the descent-consistency check;
/// `None` means the leaf is the sentinel, whose descent is all-right. An
/// empty path is accepted only for the sentinel as the root of an empty
/// map.
fn path_commits_leaf(
    trusted: &RootDigest,
    hasher: &NodeHasher,
    leaf: &Digest,
    search_key: Option<&[u8]>,
    path: &[PathStep],
) -> bool {
    if path.is_empty() {
        if search_key.is_some() {
            return false;
        }
        let folded = hasher.combine(leaf, leaf);
        return *trusted == RootDigest(folded.clone(), folded);
    }
    let mut running = leaf.clone();
    for (index, step) in path.iter().enumerate().rev() {
        let expected_left = match search_key {
            Some(key) => key <= step.node_key.as_slice(),
            None => false,
        };
        if expected_left != (step.side == Side::Left) {
            return false;
        }
        let (left, right) = match step.side {
            Side::Left => (running, step.sibling_digest.clone()),
            Side::Right => (step.sibling_digest.clone(), running),
        };
        if index == 0 {
            return RootDigest(left, right) == *trusted;
        }
        running = hasher.combine(&left, &right);
    }
    unreachable!("the loop returns at the root step")
}

fn verify_absent(
    trusted: &RootDigest,
    hasher: &NodeHasher,
    search_key: &[u8],
    left: Option<&NeighborProof>,
    right: &NeighborProof,
) -> bool {
    let (right_digest, right_key) = match &right.leaf {
        LeafWitness::Finite { key, value } => {
            if key.as_slice() <= search_key {
                return false;
            }
            (leaf_digest(hasher, key, value), Some(key.as_slice()))
        }
        LeafWitness::Sentinel => (sentinel_digest(hasher), None),
    };
    if !path_commits_leaf(trusted, hasher, &right_digest, right_key, &right.path) {
        return false;
    }
    match left {
        // No smaller key exists: the right witness must be the leftmost
        // leaf. For a finite witness that means an all-left path; the
        // sentinel can be leftmost only as the root of an empty map.
        None => match right_key {
            Some(_) => right.path.iter().all(|step| step.side == Side::Left),
            None => right.path.is_empty(),
        },
        Some(left) => {
            let LeafWitness::Finite { key, value } = &left.leaf else {
                // a predecessor is always a stored entry
                return false;
            };
            if key.as_slice() >= search_key {
                return false;
            }
            let digest = leaf_digest(hasher, key, value);
            if !path_commits_leaf(trusted, hasher, &digest, Some(key), &left.path) {
                return false;
            }
            adjacent(&left.path, &right.path)
        }
    }
}

/// Two leaves are adjacent in key order iff their paths coincide up to
/// one divergence node, where the smaller-key witness turns left and the
/// larger turns right, after which the smaller's tail is all-right (it is
/// the maximum of the divergence node's left subtree) and the larger's
/// tail is all-left.
fn adjacent(left: &[PathStep], right: &[PathStep]) -> bool {
    let shared = left
        .iter()
        .zip(right)
        .take_while(|(a, b)| a == b)
        .count();
    let (Some(left_turn), Some(right_turn)) = (left.get(shared), right.get(shared)) else {
        return false;
    };
    left_turn.side == Side::Left
        && right_turn.side == Side::Right
        && left_turn.node_key == right_turn.node_key
        && left[shared + 1..].iter().all(|step| step.side == Side::Right)
        && right[shared + 1..].iter().all(|step| step.side == Side::Left)
}
