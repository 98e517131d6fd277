//! Base64 and byte-order primitives shared by the cipher and envelope layers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::CryptoError;

/// Encode bytes as standard base64 (padded), the platform's alphabet.
pub fn base64_encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64 (padded).
pub fn base64_decode(input: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(input)
        .map_err(|e| CryptoError::Base64(e.to_string()))
}

/// Encode a u32 as 4 big-endian bytes (network byte order).
pub fn encode_u32_be(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Decode 4 big-endian bytes into a u32.
pub fn decode_u32_be(bytes: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*bytes)
}
