//! CipherLens CLI - encrypt an image under two block-cipher modes.
//!
//! Loads an image, reduces it to grayscale, encrypts it pixel-by-pixel in
//! independent-block (ECB) and manually chained (CBC) mode with one fresh
//! random 128-bit key, and writes all three stages next to the input (or
//! into an explicit output directory):
//!
//! ```text
//! cipherlens photo.png [output_dir]
//!   -> grayscale_image.png
//!   -> encrypted_image_ecb.png
//!   -> encrypted_image_cbc.png
//! ```
//!
//! Open the two encrypted images side by side: the ECB output still shows
//! the picture's structure, the CBC output does not.

use cipherlens_core::{pipeline, Key, PixelGrid};
use image::{Rgba, RgbaImage};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => PathBuf::from(path),
        None => return Err("usage: cipherlens <image> [output_dir]".into()),
    };
    let output_dir = match args.next() {
        Some(dir) => PathBuf::from(dir),
        None => input.parent().unwrap_or(Path::new(".")).to_path_buf(),
    };

    let img = image::open(&input)?.to_rgba8();
    log::info!(
        "Loaded {} ({}x{})",
        input.display(),
        img.width(),
        img.height()
    );

    let grid = grid_from_image(&img);
    let key = Key::generate(128)?;
    let output = pipeline::run(&grid, &key)?;

    save_grid(&output.grayscale, &output_dir.join("grayscale_image.png"))?;
    save_grid(&output.ecb, &output_dir.join("encrypted_image_ecb.png"))?;
    save_grid(&output.cbc, &output_dir.join("encrypted_image_cbc.png"))?;

    log::info!("Encrypted images saved successfully");
    Ok(())
}

fn save_grid(grid: &PixelGrid, path: &Path) -> Result<(), Box<dyn Error>> {
    image_from_grid(grid).save(path)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Pack an RGBA8 image into a grid of 0xAARRGGBB pixels.
fn grid_from_image(img: &RgbaImage) -> PixelGrid {
    let (width, height) = img.dimensions();
    let pixels = img
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        })
        .collect();
    PixelGrid::new(width, height, pixels)
}

/// Unpack a grid into an RGBA8 image.
///
/// Alpha is forced opaque: ciphertext lands in all four channels, and a
/// random alpha byte would blank most of the visualization.
fn image_from_grid(grid: &PixelGrid) -> RgbaImage {
    RgbaImage::from_fn(grid.width, grid.height, |x, y| {
        let p = grid.get(x, y);
        Rgba([(p >> 16) as u8, (p >> 8) as u8, p as u8, 0xFF])
    })
}
