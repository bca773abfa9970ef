//! Per-pixel encryption under two block-cipher modes.
//!
//! Both modes consume a grayscale grid and a key and produce a new grid of
//! the same dimensions, one cipher call per pixel in row-major order:
//!
//! - **Independent-block mode** ([`encrypt_ecb`]): no state crosses pixel
//!   boundaries, so identical input pixels produce identical output pixels
//!   anywhere in the grid. This is the classic ECB texture leak.
//! - **Manually chained mode** ([`encrypt_cbc`]): each pixel block is XORed
//!   with the previous pixel's raw ciphertext (seeded from a random 4-byte
//!   IV) before encryption, which destroys positional repetition.
//!
//! A pass is all-or-nothing: the first cipher failure aborts it and no
//! partial grid is returned. Traversal order inside the chained mode is part
//! of the contract - reordering pixels changes every output from that point
//! onward.

mod cbc;
mod ecb;

pub use cbc::{encrypt_cbc, encrypt_cbc_with_iv};
pub use ecb::encrypt_ecb;

use crate::cipher::{Aes128PixelCipher, CipherError, Key};
use crate::PixelGrid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from the mode engine.
#[derive(Debug, Error)]
pub enum EncryptError {
    /// An encryption-mode identifier outside the two recognized values.
    #[error("Invalid mode specified: {0}")]
    InvalidMode(String),

    /// A failure from the underlying cipher primitive, propagated unmodified.
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// The two recognized encryption modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionMode {
    /// Independent-block (electronic-codebook-style) mode.
    Ecb,
    /// Manually chained (cipher-block-chaining-style) mode.
    Cbc,
}

impl EncryptionMode {
    /// Short lowercase identifier, used in CLI arguments and file names.
    pub fn name(self) -> &'static str {
        match self {
            EncryptionMode::Ecb => "ecb",
            EncryptionMode::Cbc => "cbc",
        }
    }
}

impl fmt::Display for EncryptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncryptionMode {
    type Err = EncryptError;

    /// Parse a mode identifier, ASCII case-insensitively.
    ///
    /// Anything other than `ecb` or `cbc` is rejected with
    /// [`EncryptError::InvalidMode`] naming the offending identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ecb") {
            Ok(EncryptionMode::Ecb)
        } else if s.eq_ignore_ascii_case("cbc") {
            Ok(EncryptionMode::Cbc)
        } else {
            Err(EncryptError::InvalidMode(s.to_string()))
        }
    }
}

/// Encrypt a grid under the given mode.
///
/// Builds the AES-128 primitive from `key` and runs one full row-major pass.
/// The chained mode draws a fresh random IV for the pass; the key is only
/// read, so two invocations share no mutable state.
pub fn encrypt_image(
    grid: &PixelGrid,
    key: &Key,
    mode: EncryptionMode,
) -> Result<PixelGrid, EncryptError> {
    let cipher = Aes128PixelCipher::new(key)?;
    match mode {
        EncryptionMode::Ecb => encrypt_ecb(grid, &cipher),
        EncryptionMode::Cbc => encrypt_cbc(grid, &cipher),
    }
}

/// [`encrypt_image`] with a string mode identifier.
///
/// This is where unrecognized identifiers surface: parsing happens before
/// any cipher work.
pub fn encrypt_image_named(
    grid: &PixelGrid,
    key: &Key,
    mode: &str,
) -> Result<PixelGrid, EncryptError> {
    encrypt_image(grid, key, mode.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> Key {
        Key::from_bytes(b"0123456789abcdef").unwrap()
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("ecb".parse::<EncryptionMode>().unwrap(), EncryptionMode::Ecb);
        assert_eq!("CBC".parse::<EncryptionMode>().unwrap(), EncryptionMode::Cbc);
    }

    #[test]
    fn test_invalid_mode_names_identifier() {
        let err = "ctr".parse::<EncryptionMode>().unwrap_err();
        assert!(matches!(err, EncryptError::InvalidMode(ref m) if m == "ctr"));
        assert_eq!(err.to_string(), "Invalid mode specified: ctr");
    }

    #[test]
    fn test_encrypt_image_named_rejects_unknown_mode() {
        let grid = PixelGrid::filled(2, 2, 0);
        let err = encrypt_image_named(&grid, &test_key(), "gcm").unwrap_err();
        assert!(matches!(err, EncryptError::InvalidMode(_)));
    }

    #[test]
    fn test_encrypt_image_dispatches_to_ecb() {
        let grid = PixelGrid::filled(3, 3, 0x00424242);
        let key = test_key();
        let via_dispatch = encrypt_image(&grid, &key, EncryptionMode::Ecb).unwrap();
        let cipher = Aes128PixelCipher::new(&key).unwrap();
        let direct = encrypt_ecb(&grid, &cipher).unwrap();
        assert_eq!(via_dispatch, direct);
    }

    #[test]
    fn test_encrypt_image_cbc_preserves_dimensions() {
        let grid = PixelGrid::filled(4, 2, 0x00101010);
        let out = encrypt_image(&grid, &test_key(), EncryptionMode::Cbc).unwrap();
        assert_eq!(out.width, 4);
        assert_eq!(out.height, 2);
    }
}
