//! Cryptography for the bot callback channel: AES-256-CBC envelope
//! encryption, SHA-1 callback signatures, base64/byte-order codecs.

pub mod cipher;
pub mod codec;
pub mod envelope;
pub mod signature;

pub use cipher::EnvelopeCipher;
pub use envelope::{unwrap_envelope, wrap_envelope};
pub use signature::{compute_signature, verify_signature};

use thiserror::Error;

/// Cipher-level failures.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("base64 decode error: {0}")]
    Base64(String),

    #[error("ciphertext length {0} is not a positive multiple of 32")]
    BadCiphertextLength(usize),

    #[error("bad padding byte: {0}")]
    BadPadding(u8),
}

/// Plaintext envelope failures.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("envelope too short: {0} bytes")]
    Truncated(usize),

    #[error("declared payload length {declared} exceeds envelope size {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("receiver id mismatch")]
    ReceiverMismatch,

    #[error("payload too large for length prefix: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("secure RNG unavailable: {0}")]
    Rng(String),
}
