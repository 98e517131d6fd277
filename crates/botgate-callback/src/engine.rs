//! The message crypto engine: signature check, envelope decrypt/encrypt.

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use botgate_crypto::cipher::EnvelopeCipher;
use botgate_crypto::codec::{base64_decode, base64_encode};
use botgate_crypto::envelope::{unwrap_envelope, wrap_envelope};
use botgate_crypto::signature::{compute_signature, verify_signature};

use crate::message::{InboundMessage, StreamReply};
use crate::wire::{EncryptedEnvelope, InboundEnvelope};
use crate::{CallbackError, Credential};

/// Stateless crypto engine over one [`Credential`].
///
/// Every method is a pure request/response transformation; the engine is
/// freely shareable across concurrent callback handlers.
pub struct CallbackCrypto {
    credential: Credential,
    cipher: EnvelopeCipher,
}

impl CallbackCrypto {
    pub fn new(credential: Credential) -> Self {
        let cipher = EnvelopeCipher::new(credential.aes_key());
        Self { credential, cipher }
    }

    /// Prove control of the callback endpoint.
    ///
    /// Verifies the signature over `echostr`, decrypts it and returns the
    /// contained plaintext, which the HTTP layer echoes back verbatim.
    pub fn verify_url(
        &self,
        msg_signature: &str,
        timestamp: &str,
        nonce: &str,
        echostr: &str,
    ) -> Result<String, CallbackError> {
        self.open(msg_signature, timestamp, nonce, echostr)
    }

    /// Verify and decrypt an inbound ciphertext fragment, returning the
    /// payload JSON text.
    pub fn decrypt_message(
        &self,
        msg_signature: &str,
        timestamp: &str,
        nonce: &str,
        encrypt: &str,
    ) -> Result<String, CallbackError> {
        self.open(msg_signature, timestamp, nonce, encrypt)
    }

    /// Decrypt a full POST body (`{"encrypt": ...}`) into a typed request.
    pub fn decrypt_request(
        &self,
        msg_signature: &str,
        timestamp: &str,
        nonce: &str,
        body: &str,
    ) -> Result<InboundMessage, CallbackError> {
        let envelope = InboundEnvelope::from_json(body).map_err(|e| rejected("body", e))?;
        let plaintext = self.decrypt_message(msg_signature, timestamp, nonce, &envelope.encrypt)?;
        serde_json::from_str(&plaintext).map_err(|e| rejected("payload json", e))
    }

    /// Encrypt a reply payload and assemble the wire body.
    ///
    /// Cannot fail under normal operation; the only error path is an
    /// unavailable OS entropy source.
    pub fn encrypt_message(
        &self,
        payload: &str,
        nonce: &str,
    ) -> Result<EncryptedEnvelope, CallbackError> {
        let receiver = self.credential.receiver_id().unwrap_or_default();
        // wrap_envelope only fails when the OS RNG does
        let envelope = wrap_envelope(payload.as_bytes(), receiver.as_bytes())
            .map_err(|e| CallbackError::Rng(e.to_string()))?;

        let encrypt = base64_encode(&self.cipher.encrypt(&envelope));
        let timestamp = unix_timestamp().to_string();
        let msgsignature =
            compute_signature(self.credential.token(), &timestamp, nonce, &encrypt);

        Ok(EncryptedEnvelope {
            encrypt,
            msgsignature,
            timestamp,
            nonce: nonce.to_string(),
        })
    }

    /// Serialize a stream chunk and encrypt it into a wire JSON string.
    pub fn encrypt_stream_reply(
        &self,
        reply: &StreamReply,
        nonce: &str,
    ) -> Result<String, CallbackError> {
        let payload =
            serde_json::to_string(reply).map_err(|e| CallbackError::Serialize(e.to_string()))?;
        self.encrypt_message(&payload, nonce)?.to_json()
    }

    /// Shared verify-decrypt-unwrap pipeline.
    ///
    /// All failure causes map to the one opaque [`CallbackError::DecryptionFailed`];
    /// only the log line knows which stage rejected the message.
    fn open(
        &self,
        msg_signature: &str,
        timestamp: &str,
        nonce: &str,
        fragment: &str,
    ) -> Result<String, CallbackError> {
        if !verify_signature(
            msg_signature,
            self.credential.token(),
            timestamp,
            nonce,
            fragment,
        ) {
            return Err(rejected("signature", "mismatch"));
        }

        let ciphertext = base64_decode(fragment).map_err(|e| rejected("base64", e))?;
        let envelope = self
            .cipher
            .decrypt(&ciphertext)
            .map_err(|e| rejected("cipher", e))?;

        let expected = self.credential.receiver_id().map(str::as_bytes);
        let (payload, _) =
            unwrap_envelope(&envelope, expected).map_err(|e| rejected("envelope", e))?;

        let plaintext = String::from_utf8(payload).map_err(|e| rejected("utf-8", e))?;
        debug!(len = plaintext.len(), "decrypted callback payload");
        Ok(plaintext)
    }
}

/// Log the real cause, hand back the opaque error.
fn rejected(stage: &str, cause: impl Display) -> CallbackError {
    warn!("rejected callback ({stage}): {cause}");
    CallbackError::DecryptionFailed
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
