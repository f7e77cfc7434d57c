//! Canonical value encoding.
//!
//! The tree stores and hashes opaque value bytes; producing those bytes is
//! the caller's job. This module provides the default encoder: canonical
//! JSON, meaning object keys sorted lexicographically and no insignificant
//! whitespace. Prover and verifier must agree on the encoding, so a value
//! must always be encoded the same way before insertion and before
//! checking a verification object against it.

use serde::Serialize;

/// Encodes a value as canonical JSON bytes: sorted object keys, compact
/// separators.
pub fn to_canonical_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    // serde_json's default map representation is ordered by key and its
    // compact writer emits no whitespace, which is exactly the canonical
    // form.
    serde_json::to_vec(value)
}

/// The canonical encoding of JSON `null`, used for entries inserted
/// without a value.
pub fn canonical_null() -> Vec<u8> {
    b"null".to_vec()
}
