//! Image decoding and dimension-exact resampling.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the RGBA
//! working buffer for the pipeline. Resampling is a direct stretch to the
//! exact target dimensions: stencils are generated as uniform squares
//! matching the chosen size preset, so the source aspect ratio is
//! intentionally discarded.

use image::imageops::FilterType;

use crate::types::{RgbaImage, StencilError};

/// Decode raw image bytes into an RGBA buffer.
///
/// Supports whatever the `image` crate can decode (PNG, JPEG, BMP,
/// WebP).
///
/// # Errors
///
/// Returns [`StencilError::EmptySource`] if `bytes` is empty.
/// Returns [`StencilError::Decode`] if the image format is unrecognized
/// or the data is corrupt.
#[must_use = "returns the decoded RGBA buffer"]
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, StencilError> {
    if bytes.is_empty() {
        return Err(StencilError::EmptySource);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// Stretch an image to exactly `width` x `height` pixels.
///
/// Non-aspect-preserving: both axes are scaled independently so the
/// output dimensions are exact. Uses bilinear interpolation. Returns the
/// input unchanged (cloned) when it already has the target dimensions.
#[must_use = "returns a new buffer at the target dimensions"]
pub fn resize_exact(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.width() == width && image.height() == height {
        return image.clone();
    }

    image::imageops::resize(image, width, height, FilterType::Triangle)
}
