//! The end-to-end comparison pipeline.
//!
//! One grayscale pass, then two independent encryption passes over the same
//! grayscale grid and the same key:
//!
//! 1. Grayscale reduction
//! 2. Independent-block mode
//! 3. Manually chained mode (fresh random IV)
//!
//! The two mode runs share nothing mutable - each owns its own chain state
//! and IV - so their relative order does not affect the result.

use crate::cipher::Key;
use crate::encrypt::{encrypt_image, EncryptError, EncryptionMode};
use crate::grayscale::to_grayscale;
use crate::PixelGrid;

/// The three grids produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct ComparisonOutput {
    /// The grayscale reduction of the input.
    pub grayscale: PixelGrid,
    /// The grayscale grid encrypted in independent-block mode.
    pub ecb: PixelGrid,
    /// The grayscale grid encrypted in manually chained mode.
    pub cbc: PixelGrid,
}

/// Run the full comparison pipeline over an input grid.
///
/// Any cipher failure aborts the whole run; no partial output is returned.
pub fn run(grid: &PixelGrid, key: &Key) -> Result<ComparisonOutput, EncryptError> {
    let grayscale = to_grayscale(grid);
    let ecb = encrypt_image(&grayscale, key, EncryptionMode::Ecb)?;
    let cbc = encrypt_image(&grayscale, key, EncryptionMode::Cbc)?;
    Ok(ComparisonOutput {
        grayscale,
        ecb,
        cbc,
    })
}
