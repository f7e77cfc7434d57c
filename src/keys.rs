//! Key encoding: the [`TreeKey`] trait and implementations for the common
//! key types.
//!
//! A key type must supply a canonical byte encoding that is *injective*
//! and *order-preserving*: comparing two encodings lexicographically must
//! agree with comparing the keys themselves. Verification objects carry
//! only encoded keys, and the verifier replays every descent decision on
//! the encodings alone, so an encoding that reorders keys would let a
//! well-formed proof be rejected (or worse, a misplaced leaf be accepted).
//!
//! Integers encode big-endian; signed integers flip the sign bit first so
//! that negative values sort below positive ones. Byte strings and UTF-8
//! strings encode as their raw bytes, whose lexicographic order is already
//! their `Ord` order.

use std::fmt::Debug;

/// A totally ordered key with a canonical, order-preserving byte encoding.
pub trait TreeKey: Ord + Clone + Debug {
    /// Canonical encoding of the key. Must be injective, and lexicographic
    /// order on encodings must match `Ord` on keys.
    fn encode(&self) -> Vec<u8>;
}

macro_rules! unsigned_tree_key {
    ($($ty:ty),+) => {
        $(
            impl TreeKey for $ty {
                fn encode(&self) -> Vec<u8> {
                    self.to_be_bytes().to_vec()
                }
            }
        )+
    };
}

macro_rules! signed_tree_key {
    ($(($ty:ty, $uty:ty)),+) => {
        $(
            impl TreeKey for $ty {
                fn encode(&self) -> Vec<u8> {
                    const FLIP: $uty = 1 << (<$uty>::BITS - 1);
                    ((*self as $uty) ^ FLIP).to_be_bytes().to_vec()
                }
            }
        )+
    };
}

unsigned_tree_key!(u8, u16, u32, u64, u128, usize);
signed_tree_key!(
    (i8, u8),
    (i16, u16),
    (i32, u32),
    (i64, u64),
    (i128, u128),
    (isize, usize)
);

impl TreeKey for Vec<u8> {
    fn encode(&self) -> Vec<u8> {
        self.clone()
    }
}

impl TreeKey for String {
    fn encode(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_order_preserving<K: TreeKey>(sorted: &[K]) {
        for pair in sorted.windows(2) {
            assert!(pair[0] < pair[1], "fixture must be strictly sorted");
            assert!(
                pair[0].encode() < pair[1].encode(),
                "encoding reorders {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn unsigned_encoding_is_order_preserving() {
        assert_order_preserving(&[0u64, 1, 2, 255, 256, 65535, 1 << 40, u64::MAX]);
        assert_order_preserving(&[0u8, 1, 127, 128, 255]);
    }

    #[test]
    fn signed_encoding_is_order_preserving() {
        assert_order_preserving(&[i64::MIN, -65536, -256, -1, 0, 1, 255, 65536, i64::MAX]);
        assert_order_preserving(&[i8::MIN, -1, 0, 1, i8::MAX]);
    }

    #[test]
    fn string_encoding_is_order_preserving() {
        assert_order_preserving(&[
            String::new(),
            "a".to_string(),
            "ab".to_string(),
            "b".to_string(),
            "ba".to_string(),
        ]);
    }

    #[test]
    fn integer_encoding_is_fixed_width() {
        assert_eq!(0u64.encode().len(), 8);
        assert_eq!(u64::MAX.encode().len(), 8);
        assert_eq!((-1i32).encode().len(), 4);
    }
}
