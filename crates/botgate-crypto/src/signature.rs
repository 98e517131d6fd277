//! Callback signature computation and constant-time verification.

use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;

/// Compute the platform signature over a callback.
///
/// The token, timestamp, nonce and ciphertext fragment are sorted
/// lexicographically, concatenated, SHA-1 hashed and hex-encoded
/// (lowercase). Deterministic and side-effect free.
pub fn compute_signature(token: &str, timestamp: &str, nonce: &str, fragment: &str) -> String {
    let mut parts = [token, timestamp, nonce, fragment];
    parts.sort_unstable();

    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Verify a candidate signature against the recomputed one.
///
/// The comparison is constant time so response latency does not leak the
/// position of the first differing byte to a forger. The fixed-time
/// property is carried by `subtle::ConstantTimeEq`, not by a wall-clock
/// assertion in the tests.
pub fn verify_signature(
    candidate: &str,
    token: &str,
    timestamp: &str,
    nonce: &str,
    fragment: &str,
) -> bool {
    let expected = compute_signature(token, timestamp, nonce, fragment);
    expected.as_bytes().ct_eq(candidate.as_bytes()).into()
}
