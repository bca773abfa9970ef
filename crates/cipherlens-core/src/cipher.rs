//! The block-cipher primitive and key material.
//!
//! The rest of the pipeline only sees the [`BlockCipher`] trait: a
//! deterministic transform from one 4-byte pixel block to one 4-byte
//! ciphertext block. The production implementation is AES-128.
//!
//! # Padding and truncation policy
//!
//! AES consumes 16-byte blocks, but the pixel codec produces 4-byte blocks.
//! The policy here is fixed: the 4 pixel bytes are padded to a full AES block
//! with PKCS#7 padding bytes (twelve `0x0C` bytes), the block is encrypted
//! raw with no library-side chaining, and exactly the leading 4 ciphertext
//! bytes are returned. Both the pad and the truncation are deterministic, so
//! the primitive as a whole is a pure function of (key, pixel block).

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;
use rand::RngCore;
use std::fmt;
use thiserror::Error;

/// Size in bytes of the blocks the pipeline feeds the cipher (one pixel).
pub const PIXEL_BLOCK_SIZE: usize = 4;

/// Native AES block size in bytes.
const AES_BLOCK_SIZE: usize = 16;

/// PKCS#7 padding byte for a 4-byte payload in a 16-byte block.
const PAD_BYTE: u8 = (AES_BLOCK_SIZE - PIXEL_BLOCK_SIZE) as u8;

/// Errors from the block-cipher primitive.
///
/// None of these are retried; a cipher failure aborts the current pass.
#[derive(Debug, Error)]
pub enum CipherError {
    /// A key size other than 128 bits was requested.
    #[error("Unsupported key size: {bits} bits (only 128 is supported)")]
    UnsupportedKeySize { bits: u32 },

    /// Raw key material of the wrong length.
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// The cipher rejected the key during setup.
    #[error("Cipher key setup failed: {0}")]
    KeyInit(String),
}

/// An opaque 128-bit secret key.
///
/// Generated once per run and shared read-only by both encryption modes.
/// The key bytes are never printed; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Key([u8; AES_BLOCK_SIZE]);

impl Key {
    /// Generate a random key of the given size in bits.
    ///
    /// Only 128-bit keys are supported; any other size is rejected with
    /// [`CipherError::UnsupportedKeySize`].
    pub fn generate(bits: u32) -> Result<Self, CipherError> {
        if bits != 128 {
            return Err(CipherError::UnsupportedKeySize { bits });
        }
        let mut bytes = [0u8; AES_BLOCK_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(Self(bytes))
    }

    /// Create a key from exactly 16 bytes of key material.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        let bytes: [u8; AES_BLOCK_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CipherError::InvalidKeyLength {
                    expected: AES_BLOCK_SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self(bytes))
    }

    /// Raw key bytes, for handing to a cipher implementation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(128-bit, redacted)")
    }
}

/// A deterministic single-block encryption primitive over pixel blocks.
///
/// Implementations must be pure: the same (key, plaintext) pair always
/// produces the same ciphertext. The mode engines rely on this for the
/// independent-block mode's reproducibility.
pub trait BlockCipher {
    /// Encrypt one 4-byte pixel block, returning 4 ciphertext bytes.
    fn encrypt_block(
        &self,
        plaintext: [u8; PIXEL_BLOCK_SIZE],
    ) -> Result<[u8; PIXEL_BLOCK_SIZE], CipherError>;
}

/// AES-128 implementation of the pixel-block primitive.
pub struct Aes128PixelCipher {
    inner: Aes128,
}

impl Aes128PixelCipher {
    /// Build the cipher from a key, running AES key setup once.
    pub fn new(key: &Key) -> Result<Self, CipherError> {
        let inner = Aes128::new_from_slice(key.as_bytes())
            .map_err(|e| CipherError::KeyInit(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl BlockCipher for Aes128PixelCipher {
    fn encrypt_block(
        &self,
        plaintext: [u8; PIXEL_BLOCK_SIZE],
    ) -> Result<[u8; PIXEL_BLOCK_SIZE], CipherError> {
        let mut block = aes::Block::default();
        block[..PIXEL_BLOCK_SIZE].copy_from_slice(&plaintext);
        for byte in block[PIXEL_BLOCK_SIZE..].iter_mut() {
            *byte = PAD_BYTE;
        }
        self.inner.encrypt_block(&mut block);

        let mut ciphertext = [0u8; PIXEL_BLOCK_SIZE];
        ciphertext.copy_from_slice(&block[..PIXEL_BLOCK_SIZE]);
        Ok(ciphertext)
    }
}
