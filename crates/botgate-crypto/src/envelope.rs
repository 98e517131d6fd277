//! Length-prefixed plaintext envelope carried inside every ciphertext.
//!
//! ```text
//! random[16] + payload_len_u32_be[4] + payload + receiver_id
//! ```
//!
//! The random prefix exists because the CBC IV is fixed (see the cipher
//! module); it guarantees distinct ciphertexts for identical payloads.

use bytes::{BufMut, BytesMut};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::codec::{decode_u32_be, encode_u32_be};
use crate::EnvelopeError;

/// Length of the random prefix.
pub const RANDOM_PREFIX_LEN: usize = 16;

/// Random prefix plus the 4-byte length field.
const HEADER_LEN: usize = RANDOM_PREFIX_LEN + 4;

/// Build an envelope around `payload`, bound to `receiver_id`.
///
/// Fails only if the OS entropy source is unavailable; there is no
/// fallback to a weaker generator.
pub fn wrap_envelope(payload: &[u8], receiver_id: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    let length_field = payload_length_field(payload.len())?;

    let mut random = [0u8; RANDOM_PREFIX_LEN];
    OsRng
        .try_fill_bytes(&mut random)
        .map_err(|e| EnvelopeError::Rng(e.to_string()))?;

    let mut buf = BytesMut::with_capacity(HEADER_LEN + payload.len() + receiver_id.len());
    buf.put_slice(&random);
    buf.put_slice(&length_field);
    buf.put_slice(payload);
    buf.put_slice(receiver_id);
    Ok(buf.to_vec())
}

/// Encode a payload length into the 4-byte field, rejecting lengths the
/// prefix cannot represent instead of truncating them.
fn payload_length_field(len: usize) -> Result<[u8; 4], EnvelopeError> {
    u32::try_from(len)
        .map(encode_u32_be)
        .map_err(|_| EnvelopeError::PayloadTooLarge(len))
}

/// Parse an envelope back into `(payload, receiver_id)`.
///
/// When `expected_receiver` is set, the embedded receiver id must match
/// byte for byte; a mismatch rejects the message even though decryption
/// succeeded, closing off cross-tenant replay.
pub fn unwrap_envelope(
    envelope: &[u8],
    expected_receiver: Option<&[u8]>,
) -> Result<(Vec<u8>, Vec<u8>), EnvelopeError> {
    if envelope.len() < HEADER_LEN {
        return Err(EnvelopeError::Truncated(envelope.len()));
    }

    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&envelope[RANDOM_PREFIX_LEN..HEADER_LEN]);
    let declared = decode_u32_be(&len_bytes) as usize;

    if HEADER_LEN + declared > envelope.len() {
        return Err(EnvelopeError::LengthMismatch {
            declared,
            actual: envelope.len(),
        });
    }

    let payload = envelope[HEADER_LEN..HEADER_LEN + declared].to_vec();
    let receiver_id = envelope[HEADER_LEN + declared..].to_vec();

    if let Some(expected) = expected_receiver {
        if receiver_id != expected {
            return Err(EnvelopeError::ReceiverMismatch);
        }
    }

    Ok((payload, receiver_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_unwrap_roundtrip() {
        let envelope = wrap_envelope(b"payload bytes", b"bot-001").unwrap();
        let (payload, receiver) = unwrap_envelope(&envelope, Some(b"bot-001")).unwrap();
        assert_eq!(payload, b"payload bytes");
        assert_eq!(receiver, b"bot-001");
    }

    #[test]
    fn empty_payload_roundtrip() {
        let envelope = wrap_envelope(b"", b"bot-001").unwrap();
        assert_eq!(envelope.len(), HEADER_LEN + 7);
        let (payload, _) = unwrap_envelope(&envelope, None).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn random_prefix_differs_between_wraps() {
        let a = wrap_envelope(b"same", b"same").unwrap();
        let b = wrap_envelope(b"same", b"same").unwrap();
        assert_ne!(a[..RANDOM_PREFIX_LEN], b[..RANDOM_PREFIX_LEN]);
    }

    #[test]
    fn truncated_envelope_rejected() {
        assert!(matches!(
            unwrap_envelope(&[0u8; 19], None),
            Err(EnvelopeError::Truncated(19))
        ));
    }

    #[test]
    fn overlong_declared_length_rejected() {
        let mut envelope = wrap_envelope(b"abc", b"").unwrap();
        // Claim one more payload byte than the envelope holds
        envelope[RANDOM_PREFIX_LEN..HEADER_LEN].copy_from_slice(&encode_u32_be(4));
        assert!(matches!(
            unwrap_envelope(&envelope, None),
            Err(EnvelopeError::LengthMismatch {
                declared: 4,
                actual: 23
            })
        ));
    }

    #[test]
    fn receiver_mismatch_rejected() {
        let envelope = wrap_envelope(b"payload", b"tenant-a").unwrap();
        assert!(matches!(
            unwrap_envelope(&envelope, Some(b"tenant-b")),
            Err(EnvelopeError::ReceiverMismatch)
        ));
    }

    #[test]
    fn length_field_encodes_small_payloads() {
        assert_eq!(payload_length_field(0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(payload_length_field(256).unwrap(), [0, 0, 1, 0]);
        assert_eq!(
            payload_length_field(u32::MAX as usize).unwrap(),
            [0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_payload_length_rejected() {
        let too_big = u32::MAX as usize + 1;
        assert!(matches!(
            payload_length_field(too_big),
            Err(EnvelopeError::PayloadTooLarge(len)) if len == too_big
        ));
    }

    #[test]
    fn no_expected_receiver_skips_check() {
        let envelope = wrap_envelope(b"payload", b"whoever").unwrap();
        let (_, receiver) = unwrap_envelope(&envelope, None).unwrap();
        assert_eq!(receiver, b"whoever");
    }
}
