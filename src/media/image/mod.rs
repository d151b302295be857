//! Image carrier support.
//!
//! Input rasters come from PNG or JPEG and are widened to RGBA once; all
//! embedding happens on the raster. Output is always PNG, since a lossy
//! format would grind the low bits the codecs just wrote. PNG is lossless
//! at any setting, so the writer simply picks no filtering and the fastest
//! deflate pass to keep the output close to the raw raster.

pub mod bpcs;
pub mod lsb_codec;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::StegoError;
use crate::result::Result;

/// Decodes a PNG or JPEG file into an RGBA raster.
pub fn read_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)
        .map_err(|_| StegoError::InvalidImageMedia)?
        .to_rgba8())
}

/// Decodes an in-memory PNG or JPEG into an RGBA raster.
pub fn rgba_from_bytes(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)
        .map_err(|_| StegoError::InvalidImageMedia)?
        .to_rgba8())
}

/// Writes the raster as PNG to the given path.
pub fn write_png(image: &RgbaImage, target: &Path) -> Result<()> {
    let file = File::create(target).map_err(|source| StegoError::WriteError { source })?;
    encode_png(image, BufWriter::new(file))
}

/// Serializes the raster as PNG bytes.
pub fn png_bytes(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_png(image, &mut out)?;
    Ok(out)
}

fn encode_png<W: std::io::Write>(image: &RgbaImage, writer: W) -> Result<()> {
    PngEncoder::new_with_quality(writer, CompressionType::Fast, FilterType::NoFilter)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|_| StegoError::ImageEncodingError)
}
