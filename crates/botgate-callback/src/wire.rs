//! Wire JSON exchanged with the platform over HTTP.

use serde::{Deserialize, Serialize};

use crate::CallbackError;

/// Encrypted reply body, as sent back to the platform.
///
/// ```text
/// {"encrypt":"<base64>","msgsignature":"<sha1 hex>","timestamp":"1700000000","nonce":"n1"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    pub encrypt: String,
    pub msgsignature: String,
    pub timestamp: String,
    pub nonce: String,
}

impl EncryptedEnvelope {
    pub fn to_json(&self) -> Result<String, CallbackError> {
        serde_json::to_string(self).map_err(|e| CallbackError::Serialize(e.to_string()))
    }
}

/// Inbound POST body; only the ciphertext field matters at this layer.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEnvelope {
    pub encrypt: String,
}

impl InboundEnvelope {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}
