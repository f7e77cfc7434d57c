//! Building verification objects from a tree.
//!
//! A membership proof is the entry plus its root-to-leaf path, each step
//! carrying the digest of the child the descent did not take. An absence
//! proof pairs the same construction for the two leaves that surround the
//! missing key in the leaf list; the descent for a missing key terminates
//! at its successor leaf, so the surrounding pair is the terminal leaf and
//! its predecessor.

use crate::keys::TreeKey;
use crate::proof::vo::{LeafWitness, NeighborProof, PathStep, Side, VerificationObject};
use crate::tree::arena::{LeafKey, NodeId};
use crate::tree::MerkleRbTree;

impl<K: TreeKey> MerkleRbTree<K> {
    /// Builds a verification object for `key`: membership when present,
    /// absence otherwise. Never fails.
    pub fn prove(&self, key: &K) -> VerificationObject {
        let (leaf_id, _) = self.descend(key);
        let leaf = self.arena.leaf(leaf_id);
        if leaf.key.as_finite() == Some(key) {
            return VerificationObject::Found {
                search_key: key.encode(),
                value: leaf.value.clone(),
                path: self.path_from_root(leaf_id),
            };
        }
        VerificationObject::Absent {
            search_key: key.encode(),
            left: leaf.prev.map(|prev| self.neighbor_proof(prev)),
            right: self.neighbor_proof(leaf_id),
        }
    }

    /// Lookup with proof: the stored value (when present) together with
    /// the verification object for `key`.
    pub fn get_verified(&self, key: &K) -> (Option<&[u8]>, VerificationObject) {
        (self.get(key), self.prove(key))
    }

    fn neighbor_proof(&self, leaf_id: NodeId) -> NeighborProof {
        let leaf = self.arena.leaf(leaf_id);
        let witness = match &leaf.key {
            LeafKey::Key(key) => LeafWitness::Finite {
                key: key.encode(),
                value: leaf.value.clone(),
            },
            LeafKey::Sup => LeafWitness::Sentinel,
        };
        NeighborProof {
            leaf: witness,
            path: self.path_from_root(leaf_id),
        }
    }

    /// Collects `(side, node key, opposite-child digest)` for every
    /// internal node from the root down to `leaf_id`.
    fn path_from_root(&self, leaf_id: NodeId) -> Vec<PathStep> {
        let mut steps = Vec::new();
        let mut child = leaf_id;
        let mut cursor = self.arena.node(leaf_id).parent();
        while let Some(parent_id) = cursor {
            let internal = self.arena.internal(parent_id);
            let (side, sibling_digest) = if internal.left == child {
                (Side::Left, internal.right_digest.clone())
            } else {
                (Side::Right, internal.left_digest.clone())
            };
            steps.push(PathStep {
                side,
                node_key: internal.key.encode(),
                sibling_digest,
            });
            child = parent_id;
            cursor = internal.parent;
        }
        steps.reverse();
        steps
    }
}
