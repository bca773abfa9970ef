//! Independent-block mode: one isolated cipher call per pixel.
//!
//! No chaining state crosses pixel boundaries, so the mode is a pure
//! per-pixel map. Identical plaintext pixels necessarily produce identical
//! ciphertext pixels, which is exactly the position-independent pattern leak
//! this mode exists to demonstrate.

use crate::cipher::BlockCipher;
use crate::codec::{bytes_to_pixel, pixel_to_bytes};
use crate::encrypt::EncryptError;
use crate::PixelGrid;

/// Encrypt a grid in independent-block mode.
///
/// Each pixel in row-major order is encoded to its 4-byte block, encrypted
/// on its own, and the ciphertext decoded back into the output pixel at the
/// same coordinates. The first cipher failure aborts the pass with no
/// partial grid.
pub fn encrypt_ecb<C: BlockCipher>(
    grid: &PixelGrid,
    cipher: &C,
) -> Result<PixelGrid, EncryptError> {
    let mut pixels = Vec::with_capacity(grid.pixels.len());
    for &pixel in &grid.pixels {
        let ciphertext = cipher.encrypt_block(pixel_to_bytes(pixel))?;
        pixels.push(bytes_to_pixel(ciphertext));
    }
    Ok(PixelGrid::new(grid.width, grid.height, pixels))
}
