#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod constant;
pub mod encode;
pub mod fuzz;
mod hasher;
mod keys;
mod proof;
mod tree;
mod types;

pub use hasher::{HashAlgorithm, NodeHasher, UnknownAlgorithm};
pub use keys::TreeKey;
pub use proof::{
    verify, LeafWitness, NeighborProof, PathStep, ProofError, Side, VerificationObject,
};
pub use tree::{Iter, MerkleRbTree, SelfCheckError};
pub use types::{ChangeOrigin, ChangeSetEntry, Digest, Entry, RootDigest};

#[cfg(test)]
mod tests {
    use super::*;

    /// A complete workflow: build a map, look entries up with proofs,
    /// verify them with nothing but the root digest, then diff two maps.
    #[test]
    fn basic_integration_test() {
        let mut tree: MerkleRbTree<u64> = MerkleRbTree::new();
        for key in [5u64, 3, 8, 1, 9, 7] {
            let value = encode::to_canonical_json(&key.to_string()).unwrap();
            assert!(tree.insert(key, value));
        }
        assert_eq!(tree.len(), 6);
        tree.self_check().unwrap();

        // Alice publishes the root digest.
        let root = tree.digest();

        // Bob asks for key 7 and checks the proof against the root alone.
        let (value, vo) = tree.get_verified(&7);
        assert_eq!(value.unwrap(), br#""7""#);
        let wire = vo.to_bytes();
        let decoded =
            VerificationObject::from_bytes(&wire, tree.hasher().digest_len()).unwrap();
        assert!(verify(&root, &decoded, tree.hasher()));

        // Absence of key 6 is provable the same way.
        let (missing, vo) = tree.get_verified(&6);
        assert!(missing.is_none());
        assert!(verify(&root, &vo, tree.hasher()));

        // Carol holds a diverged copy; the change set pins down exactly
        // what differs.
        let mut copy = tree.clone();
        copy.delete(&8);
        copy.set(1, b"\"one\"".to_vec());
        let changes = tree.get_change_set(&copy);
        assert_eq!(changes.len(), 3);
        assert_eq!(
            changes
                .iter()
                .filter(|c| c.origin == ChangeOrigin::Source)
                .count(),
            2
        );

        // Deleting and re-adding an entry restores the content.
        copy.set(1, encode::to_canonical_json(&"1".to_string()).unwrap());
        copy.insert(8, encode::to_canonical_json(&"8".to_string()).unwrap());
        assert!(tree.get_change_set(&copy).is_empty());
    }

    #[test]
    fn named_algorithms_all_work() {
        for name in [
            "sha1", "sha224", "sha256", "sha384", "sha512", "blake2b", "blake2s", "blake3",
        ] {
            let algorithm: HashAlgorithm = name.parse().unwrap();
            let mut tree: MerkleRbTree<u64> = MerkleRbTree::with_algorithm(algorithm);
            for key in 0..20u64 {
                tree.insert(key, encode::canonical_null());
            }
            tree.self_check().unwrap();
            let root = tree.digest();
            assert_eq!(root.0.len(), algorithm.digest_len());

            let (_, vo) = tree.get_verified(&11);
            assert!(verify(&root, &vo, tree.hasher()), "{name}");
            let (_, vo) = tree.get_verified(&1000);
            assert!(verify(&root, &vo, tree.hasher()), "{name}");
        }
    }

    #[test]
    fn equality_follows_the_root_digest() {
        let a: MerkleRbTree<u64> = MerkleRbTree::from_keys([1, 2, 3]);
        let b: MerkleRbTree<u64> = MerkleRbTree::from_keys([1, 2, 3]);
        let c: MerkleRbTree<u64> = MerkleRbTree::from_keys([1, 2]);
        assert!(a == b);
        assert!(a != c);
        assert_eq!(a.digest(), b.digest());
    }
}
