//! Grayscale reduction using the unweighted channel average.
//!
//! The encryption stages operate on a single-channel image so that the
//! visual structure surviving (or not surviving) encryption is easy to read.
//! The gray value is the unweighted average `(r + g + b) / 3` with truncating
//! integer division, not a perceptual (ITU-R BT.709 weighted) luminance; the
//! exact gray values are part of the pipeline's output contract.

use crate::PixelGrid;

/// Reduce a grid to grayscale.
///
/// Produces a new grid of identical dimensions where each pixel's red, green
/// and blue channels are replaced by their truncating integer average. The
/// alpha byte is carried through unchanged and never interpreted.
///
/// Channel extraction uses masking, so every `u32` is valid input; this is a
/// pure function with no error conditions.
pub fn to_grayscale(grid: &PixelGrid) -> PixelGrid {
    let pixels = grid.pixels.iter().map(|&rgb| gray_pixel(rgb)).collect();
    PixelGrid::new(grid.width, grid.height, pixels)
}

/// Average the RGB channels of one packed pixel, preserving alpha.
#[inline]
fn gray_pixel(rgb: u32) -> u32 {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;
    let gray = (r + g + b) / 3;
    (rgb & 0xFF00_0000) | (gray << 16) | (gray << 8) | gray
}
