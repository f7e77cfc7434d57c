//! Verification objects: construction, wire codec and verification.
//!
//! A verification object (VO) accompanies a lookup and lets a third party
//! holding only the trusted root digest pair and the hash adapter check
//! that a key maps to a value, or that a key is absent. Building VOs
//! requires the tree; verifying them does not.

use thiserror::Error;

mod prover;
mod verifier;
mod vo;

pub use verifier::verify;
pub use vo::{LeafWitness, NeighborProof, PathStep, Side, VerificationObject};

/// Error type for decoding verification objects. Verification itself
/// never errors; it returns `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    /// The input ended before the encoding was complete.
    #[error("verification object truncated")]
    Truncated,
    /// Bytes remained after a complete encoding.
    #[error("trailing bytes after verification object")]
    TrailingBytes,
    /// The leading version byte is not understood.
    #[error("unsupported verification object version {0:#04x}")]
    UnsupportedVersion(u8),
    /// A tag byte holds a value outside its alphabet.
    #[error("invalid {field} tag {value:#04x}")]
    InvalidTag {
        /// Which tag field was malformed.
        field: &'static str,
        /// The offending byte.
        value: u8,
    },
}
