//! Immutable per-bot credential: token, AES key, optional receiver id.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::CallbackError;

/// The encoding key secret is always 43 base64 characters (32 bytes with
/// the trailing `=` stripped by the platform console).
pub const ENCODING_KEY_LEN: usize = 43;

/// Credential for one bot integration, built once at startup and shared
/// read-only across callback handlers.
#[derive(Clone)]
pub struct Credential {
    token: String,
    aes_key: [u8; 32],
    receiver_id: Option<String>,
}

impl Credential {
    /// Validate and decode a credential.
    ///
    /// A wrong key length or a key that does not decode to exactly 32
    /// bytes is a configuration error and must abort startup.
    pub fn new(
        token: impl Into<String>,
        encoding_key: &str,
        receiver_id: Option<String>,
    ) -> Result<Self, CallbackError> {
        if encoding_key.len() != ENCODING_KEY_LEN {
            return Err(CallbackError::Config(format!(
                "encoding key must be {ENCODING_KEY_LEN} characters, got {}",
                encoding_key.len()
            )));
        }

        let decoded = STANDARD
            .decode(format!("{encoding_key}="))
            .map_err(|e| CallbackError::Config(format!("encoding key is not base64: {e}")))?;

        let aes_key: [u8; 32] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| {
                CallbackError::Config(format!("encoding key decodes to {} bytes, need 32", v.len()))
            })?;

        Ok(Self {
            token: token.into(),
            aes_key,
            receiver_id,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn aes_key(&self) -> &[u8; 32] {
        &self.aes_key
    }

    pub fn receiver_id(&self) -> Option<&str> {
        self.receiver_id.as_deref()
    }
}

// Manual impl so the AES key never lands in logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("aes_key", &"<redacted>")
            .field("receiver_id", &self.receiver_id)
            .finish()
    }
}
