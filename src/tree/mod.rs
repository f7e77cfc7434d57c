//! The authenticated map itself: node arena, balancing, digests, queries
//! and the change-set walk.

pub(crate) mod arena;
mod diff;
#[allow(clippy::module_inception)]
mod tree;

pub use tree::{Iter, MerkleRbTree, SelfCheckError};
