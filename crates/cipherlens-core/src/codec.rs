//! Pixel codec: 32-bit packed pixels to and from 4-byte blocks.
//!
//! The cipher primitive works on byte blocks, so every pixel crosses this
//! boundary twice per encryption: once on the way in (big-endian split) and
//! once on the way out (big-endian recombination of the ciphertext).

/// Split a packed 32-bit pixel into 4 bytes, most significant byte first.
#[inline]
pub fn pixel_to_bytes(pixel: u32) -> [u8; 4] {
    pixel.to_be_bytes()
}

/// Recombine 4 big-endian bytes into a packed 32-bit pixel.
///
/// Inverse of [`pixel_to_bytes`]: `bytes_to_pixel(pixel_to_bytes(p)) == p`
/// for every 32-bit `p`.
#[inline]
pub fn bytes_to_pixel(bytes: [u8; 4]) -> u32 {
    u32::from_be_bytes(bytes)
}
