//! Randomized end-to-end exercising of the tree against a reference
//! oracle.
//!
//! Operation sequences are applied in lockstep to a [`MerkleRbTree`] and a
//! plain [`BTreeMap`]. After every batch the harness checks:
//!
//! - **Content consistency**: lookups, size and in-order iteration match
//!   the oracle exactly.
//! - **Structural soundness**: `self_check` accepts the tree (ordering,
//!   balance, digests, leaf ring, counters).
//! - **Authentication**: sampled keys - present and absent - produce
//!   verification objects that verify against the current root and stop
//!   verifying against stale roots.
//!
//! Operations reference keys through indices into a fixed pool so the
//! generator concentrates on sequence shapes rather than key generation.

use crate::encode;
use crate::tree::MerkleRbTree;
use std::collections::BTreeMap;

/// One mutation of the map, with keys drawn from a pool by index.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Insert the indexed pool key; ignored when present. The `u8` seeds
    /// the value bytes.
    Insert(u16, u8),
    /// Delete the indexed pool key; ignored when absent.
    Delete(u16),
    /// Insert-or-update the indexed pool key with a fresh value.
    Set(u16, u8),
}

/// Applies `operations` to both the tree and the oracle. Key indices wrap
/// around the pool size.
pub fn apply_operations(
    tree: &mut MerkleRbTree<u64>,
    oracle: &mut BTreeMap<u64, Vec<u8>>,
    pool: &[u64],
    operations: &[Operation],
) {
    for operation in operations {
        match *operation {
            Operation::Insert(index, salt) => {
                let key = pool[index as usize % pool.len()];
                let value = value_bytes(key, salt);
                tree.insert(key, value.clone());
                oracle.entry(key).or_insert(value);
            }
            Operation::Delete(index) => {
                let key = pool[index as usize % pool.len()];
                let removed = tree.delete(&key);
                assert_eq!(removed, oracle.remove(&key).is_some());
            }
            Operation::Set(index, salt) => {
                let key = pool[index as usize % pool.len()];
                let value = value_bytes(key, salt);
                tree.set(key, value.clone());
                oracle.insert(key, value);
            }
        }
    }
}

fn value_bytes(key: u64, salt: u8) -> Vec<u8> {
    encode::to_canonical_json(&format!("{key}:{salt}")).unwrap_or_default()
}

/// Full content comparison between tree and oracle.
pub fn assert_matches_oracle(tree: &MerkleRbTree<u64>, oracle: &BTreeMap<u64, Vec<u8>>) {
    assert_eq!(tree.len(), oracle.len());
    let from_tree: Vec<(u64, &[u8])> = tree.iter().map(|(k, v)| (*k, v)).collect();
    let from_oracle: Vec<(u64, &[u8])> = oracle.iter().map(|(k, v)| (*k, v.as_slice())).collect();
    assert_eq!(from_tree, from_oracle);
}
