//! Callback-side message security for the enterprise chat bot platform:
//! verifies inbound callback signatures, decrypts request envelopes and
//! encrypts (streamed) replies. HTTP routing and message dispatch live in
//! the caller; this crate only turns wire strings into plaintext and back.

pub mod config;
pub mod credential;
pub mod engine;
pub mod message;
pub mod wire;

pub use credential::Credential;
pub use engine::CallbackCrypto;
pub use message::{InboundMessage, StreamReply};
pub use wire::EncryptedEnvelope;

use thiserror::Error;

/// Errors surfaced by the callback engine.
///
/// Every inbound failure collapses into [`CallbackError::DecryptionFailed`]
/// so a network caller cannot distinguish a forged signature from bad
/// padding or a receiver-id mismatch. The specific cause is logged at
/// `warn` level and nowhere else.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("invalid credential: {0}")]
    Config(String),

    #[error("message decryption failed")]
    DecryptionFailed,

    #[error("secure RNG unavailable: {0}")]
    Rng(String),

    #[error("reply serialization failed: {0}")]
    Serialize(String),
}
