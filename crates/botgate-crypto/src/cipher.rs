//! AES-256-CBC envelope encryption with the platform's padding scheme.

use aes::Aes256;
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use cbc::{Decryptor, Encryptor};

use crate::CryptoError;

/// The platform pads plaintext to this boundary (double the AES block size).
pub const PAD_BLOCK_SIZE: usize = 32;

const AES_BLOCK_SIZE: usize = 16;

/// Stateless AES-256-CBC cipher over callback envelopes.
///
/// Platform convention: the IV is the first 16 bytes of the 32-byte key —
/// it is never random and never transmitted. Confidentiality rests on the
/// 16-byte random prefix inside every envelope, not on the IV.
pub struct EnvelopeCipher {
    key: [u8; 32],
    iv: [u8; 16],
}

impl EnvelopeCipher {
    /// Create a cipher from the decoded 32-byte encoding key.
    pub fn new(key: &[u8; 32]) -> Self {
        let mut iv = [0u8; 16];
        iv.copy_from_slice(&key[..AES_BLOCK_SIZE]);
        Self { key: *key, iv }
    }

    /// Pad and encrypt a plaintext envelope.
    ///
    /// Padding always adds between 1 and 32 bytes, each holding the pad
    /// count, so an exact 32-byte multiple gains a full extra block pair.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut data = plaintext.to_vec();
        let pad = PAD_BLOCK_SIZE - data.len() % PAD_BLOCK_SIZE;
        data.resize(data.len() + pad, pad as u8);

        let mut cipher = Encryptor::<Aes256>::new((&self.key).into(), (&self.iv).into());
        for chunk in data.chunks_exact_mut(AES_BLOCK_SIZE) {
            cipher.encrypt_block_mut(GenericArray::from_mut_slice(chunk));
        }
        data
    }

    /// Decrypt a ciphertext envelope and strip the padding.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.is_empty() || ciphertext.len() % PAD_BLOCK_SIZE != 0 {
            return Err(CryptoError::BadCiphertextLength(ciphertext.len()));
        }

        let mut data = ciphertext.to_vec();
        let mut cipher = Decryptor::<Aes256>::new((&self.key).into(), (&self.iv).into());
        for chunk in data.chunks_exact_mut(AES_BLOCK_SIZE) {
            cipher.decrypt_block_mut(GenericArray::from_mut_slice(chunk));
        }

        let pad = *data.last().expect("length checked above");
        if !(1..=PAD_BLOCK_SIZE as u8).contains(&pad) || pad as usize > data.len() {
            return Err(CryptoError::BadPadding(pad));
        }
        data.truncate(data.len() - pad as usize);
        Ok(data)
    }
}
