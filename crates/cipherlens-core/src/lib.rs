//! CipherLens Core - Block-cipher mode visualization
//!
//! This crate provides the core pipeline for CipherLens: it reduces an image
//! to grayscale, then encrypts it pixel-by-pixel under two block-cipher modes
//! (independent-block and manually chained) so the output textures can be
//! compared side by side.
//!
//! The construction is deliberately insecure - a block cipher applied at
//! pixel granularity is a teaching device, not an encryption scheme. There is
//! no decryption path.

pub mod cipher;
pub mod codec;
pub mod encrypt;
pub mod grayscale;
pub mod pipeline;

pub use cipher::{Aes128PixelCipher, BlockCipher, CipherError, Key};
pub use codec::{bytes_to_pixel, pixel_to_bytes};
pub use encrypt::{encrypt_image, EncryptError, EncryptionMode};
pub use grayscale::to_grayscale;
pub use pipeline::{run, ComparisonOutput};

/// A rectangular grid of packed 32-bit pixels.
///
/// Pixels are stored in row-major order, one `u32` per pixel, with the
/// channels packed as `0xAARRGGBB`. The alpha byte is carried through the
/// pipeline but never interpreted.
///
/// Every pipeline stage produces a new grid rather than mutating its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Grid width in pixels.
    pub width: u32,
    /// Grid height in pixels.
    pub height: u32,
    /// Packed pixel data in row-major order.
    /// Length should be width * height.
    pub pixels: Vec<u32>,
}

impl PixelGrid {
    /// Create a new PixelGrid with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a grid of the given dimensions with every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Get the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "Pixel out of bounds");
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the grid.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u32) {
        assert!(x < self.width && y < self.height, "Pixel out of bounds");
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = value;
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Check if this is an empty/invalid grid.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
