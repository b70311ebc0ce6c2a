//! Field-level encryption for sensitive monetary and score values.
//!
//! Amounts and exam scores are stored as ciphertext and only decrypted in the
//! service layer. The cipher is an opaque reversible keystream construction:
//! a random per-value nonce, SHA-256-derived keystream blocks, XOR, base64.
//! Swapping in a different cipher only requires touching this module.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::ApiError;

const NONCE_LEN: usize = 16;
const BLOCK_LEN: usize = 32;

/// Reversible cipher for individual database fields.
#[derive(Clone)]
pub struct FieldCipher {
    key: [u8; 32],
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher").finish_non_exhaustive()
    }
}

impl FieldCipher {
    /// Derive the cipher key from the configured secret.
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self { key }
    }

    fn keystream_block(&self, nonce: &[u8], counter: u32) -> [u8; BLOCK_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(self.key);
        hasher.update(nonce);
        hasher.update(counter.to_le_bytes());
        let digest = hasher.finalize();
        let mut block = [0u8; BLOCK_LEN];
        block.copy_from_slice(&digest);
        block
    }

    fn apply_keystream(&self, nonce: &[u8], data: &mut [u8]) {
        for (i, chunk) in data.chunks_mut(BLOCK_LEN).enumerate() {
            let block = self.keystream_block(nonce, i as u32);
            for (byte, key_byte) in chunk.iter_mut().zip(block.iter()) {
                *byte ^= key_byte;
            }
        }
    }

    /// Encrypt a plaintext field value. Each call uses a fresh nonce, so equal
    /// plaintexts produce distinct ciphertexts.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let mut data = plaintext.as_bytes().to_vec();
        self.apply_keystream(&nonce, &mut data);

        let mut payload = Vec::with_capacity(NONCE_LEN + data.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&data);
        BASE64.encode(payload)
    }

    /// Decrypt a stored field value.
    pub fn decrypt(&self, encoded: &str) -> Result<String, ApiError> {
        let payload = BASE64
            .decode(encoded)
            .map_err(|_| ApiError::Internal("corrupt encrypted field".to_string()))?;

        if payload.len() < NONCE_LEN {
            return Err(ApiError::Internal("corrupt encrypted field".to_string()));
        }

        let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
        let mut data = ciphertext.to_vec();
        self.apply_keystream(nonce, &mut data);

        String::from_utf8(data)
            .map_err(|_| ApiError::Internal("corrupt encrypted field".to_string()))
    }

    /// Encrypt a monetary amount or score.
    pub fn encrypt_amount(&self, amount: f64) -> String {
        self.encrypt(&format!("{amount:.2}"))
    }

    /// Decrypt a monetary amount or score.
    pub fn decrypt_amount(&self, encoded: &str) -> Result<f64, ApiError> {
        self.decrypt(encoded)?
            .parse()
            .map_err(|_| ApiError::Internal("corrupt encrypted amount".to_string()))
    }
}
