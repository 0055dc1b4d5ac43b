//! sumi-pipeline: Pure stencil processing pipeline (sans-IO).
//!
//! Converts raster tattoo designs into binary transfer stencils through:
//! decode -> exact resize to the preset's square canvas ->
//! threshold binarization | edge extraction.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and `image` buffers. Paper handling, metadata, and
//! document assembly live in `sumi-export`.

pub mod edge;
pub mod progress;
pub mod raster;
pub mod sizes;
pub mod threshold;
pub mod types;

pub use progress::{ProgressFn, StageProgress};
pub use sizes::{REFERENCE_DPI, SizeKey, SizePreset, pixels_for};
pub use types::{
    Dimensions, EdgeSettings, GrayImage, RgbaImage, StencilError, StencilMode, ThresholdSettings,
};

/// Fraction of a pipeline run attributed to decode + resize; the
/// binarization stage occupies the remainder.
pub const RESIZE_PROGRESS_WEIGHT: f32 = 0.3;

/// Run the full stencil pipeline.
///
/// Takes raw image bytes (PNG, JPEG, BMP, WebP), stretches the decoded
/// image to the square canvas of the chosen size preset, and applies the
/// selected binarization mode. The result is a binary buffer
/// (`r == g == b`, each 0 or 255, alpha preserved) at exactly
/// `pixels_for(size)` on each edge.
///
/// Progress is reported through `on_progress` as a non-decreasing
/// fraction: resize completion lands at [`RESIZE_PROGRESS_WEIGHT`] and
/// the binarization stage fills the remaining range up to `1.0`.
///
/// # Errors
///
/// Returns [`StencilError::EmptySource`] if `image_bytes` is empty.
/// Returns [`StencilError::Decode`] if the image format is unrecognized
/// or the data is corrupt.
pub fn process(
    image_bytes: &[u8],
    size: SizeKey,
    mode: &StencilMode,
    mut on_progress: Option<&mut ProgressFn<'_>>,
) -> Result<RgbaImage, StencilError> {
    let decoded = raster::decode(image_bytes)?;

    let edge_pixels = sizes::pixels_for(size);
    let mut canvas = raster::resize_exact(&decoded, edge_pixels, edge_pixels);
    if let Some(cb) = on_progress.as_mut() {
        cb(RESIZE_PROGRESS_WEIGHT);
    }

    match mode {
        StencilMode::Threshold(settings) => {
            if let Some(cb) = on_progress {
                let mut stage = StageProgress::new(cb, RESIZE_PROGRESS_WEIGHT, 1.0);
                let mut forward = |fraction: f32| stage.report(fraction);
                threshold::apply(&mut canvas, settings, Some(&mut forward));
            } else {
                threshold::apply(&mut canvas, settings, None);
            }
        }
        StencilMode::Edge(settings) => {
            canvas = edge::detect(&canvas, settings);
            if let Some(cb) = on_progress {
                cb(1.0);
            }
        }
    }

    Ok(canvas)
}
