//! Change sets: the symmetric difference of two trees, computed by a
//! lockstep walk that skips any positionally paired subtrees with equal
//! digests.
//!
//! Skipped pairs hold identical content, so the leaves gathered from the
//! unpruned regions of both trees contain every differing entry. The
//! gathered entries are then reconciled into the exact symmetric
//! difference with an ordered merge, which also makes the output
//! independent of how the two trees happen to be shaped. For trees that
//! share construction history the walk touches `O(|diff| * log n)` nodes;
//! thoroughly different shapes over similar content degrade toward a full
//! walk.

use crate::keys::TreeKey;
use crate::tree::arena::{Node, NodeId};
use crate::tree::tree::MerkleRbTree;
use crate::types::{ChangeOrigin, ChangeSetEntry, Entry};
use itertools::{EitherOrBoth, Itertools};
use std::collections::BTreeMap;

impl<K: TreeKey> MerkleRbTree<K> {
    /// Entries on which `self` (origin `Source`) and `other` (origin
    /// `Destination`) disagree, in ascending key order, `Source` first for
    /// a key present on both sides with different values.
    ///
    /// Both trees must use digest-compatible hash adapters; otherwise no
    /// pruning is sound and the result is undefined.
    pub fn get_change_set(&self, other: &Self) -> Vec<ChangeSetEntry<K>> {
        let mut mine = BTreeMap::new();
        let mut theirs = BTreeMap::new();
        self.collect_unequal(other, self.root, other.root, &mut mine, &mut theirs);

        mine.into_iter()
            .merge_join_by(theirs, |(a, _), (b, _)| a.cmp(b))
            .flat_map(|joined| match joined {
                EitherOrBoth::Left((key, value)) => vec![ChangeSetEntry {
                    origin: ChangeOrigin::Source,
                    entry: Entry { key, value },
                }],
                EitherOrBoth::Right((key, value)) => vec![ChangeSetEntry {
                    origin: ChangeOrigin::Destination,
                    entry: Entry { key, value },
                }],
                EitherOrBoth::Both((key, mine), (_, theirs)) => {
                    if mine == theirs {
                        Vec::new()
                    } else {
                        vec![
                            ChangeSetEntry {
                                origin: ChangeOrigin::Source,
                                entry: Entry {
                                    key: key.clone(),
                                    value: mine,
                                },
                            },
                            ChangeSetEntry {
                                origin: ChangeOrigin::Destination,
                                entry: Entry {
                                    key,
                                    value: theirs,
                                },
                            },
                        ]
                    }
                }
            })
            .collect()
    }

    /// Walks `(a, b)` in lockstep, gathering the finite leaves of every
    /// subtree pair whose digests differ.
    fn collect_unequal(
        &self,
        other: &Self,
        a: NodeId,
        b: NodeId,
        mine: &mut BTreeMap<K, Vec<u8>>,
        theirs: &mut BTreeMap<K, Vec<u8>>,
    ) {
        if self.subtree_digest(a) == other.subtree_digest(b) {
            return;
        }
        match (self.arena.node(a), other.arena.node(b)) {
            (Node::Internal(a_int), Node::Internal(b_int)) => {
                self.collect_unequal(other, a_int.left, b_int.left, mine, theirs);
                self.collect_unequal(other, a_int.right, b_int.right, mine, theirs);
            }
            _ => {
                self.gather_leaves(a, mine);
                other.gather_leaves(b, theirs);
            }
        }
    }

    /// Adds every finite leaf under `id` to `into`.
    fn gather_leaves(&self, id: NodeId, into: &mut BTreeMap<K, Vec<u8>>) {
        match self.arena.node(id) {
            Node::Leaf(leaf) => {
                if let Some(key) = leaf.key.as_finite() {
                    into.insert(key.clone(), leaf.value.clone());
                }
            }
            Node::Internal(internal) => {
                self.gather_leaves(internal.left, into);
                self.gather_leaves(internal.right, into);
            }
        }
    }
}
