//! Shared types for the sumi stencil pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference the
/// working pixel buffer without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of an RGBA buffer.
    #[must_use]
    pub fn of(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }

    /// Total pixel count (`width * height`).
    #[must_use]
    pub const fn pixel_count(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Settings for threshold binarization.
///
/// All parameters have defaults matching the stencil most artists
/// start from: a mid-gray cut with a slight contrast boost.
///
/// # Valid ranges
///
/// `contrast` must lie in [`MIN_CONTRAST`](Self::MIN_CONTRAST)..=
/// [`MAX_CONTRAST`](Self::MAX_CONTRAST) and `brightness` in
/// [`MIN_BRIGHTNESS`](Self::MIN_BRIGHTNESS)..=
/// [`MAX_BRIGHTNESS`](Self::MAX_BRIGHTNESS). The ranges are enforced at
/// the export boundary (`sumi-export`), not here —
/// [`threshold::apply`](crate::threshold::apply) clamps per-pixel values
/// and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSettings {
    /// Gray cutoff: adjusted values at or above this become white.
    pub threshold: u8,

    /// Contrast multiplier applied about the mid-gray point (128).
    pub contrast: f32,

    /// Brightness offset added to the gray value before contrast.
    pub brightness: i16,

    /// Swap black and white in the output (white-on-black stencil).
    pub invert: bool,
}

impl ThresholdSettings {
    /// Default gray cutoff.
    pub const DEFAULT_THRESHOLD: u8 = 128;
    /// Default contrast multiplier.
    pub const DEFAULT_CONTRAST: f32 = 1.2;
    /// Default brightness offset.
    pub const DEFAULT_BRIGHTNESS: i16 = 0;
    /// Minimum valid contrast multiplier.
    pub const MIN_CONTRAST: f32 = 0.1;
    /// Maximum valid contrast multiplier.
    pub const MAX_CONTRAST: f32 = 5.0;
    /// Minimum valid brightness offset.
    pub const MIN_BRIGHTNESS: i16 = -255;
    /// Maximum valid brightness offset.
    pub const MAX_BRIGHTNESS: i16 = 255;
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            contrast: Self::DEFAULT_CONTRAST,
            brightness: Self::DEFAULT_BRIGHTNESS,
            invert: false,
        }
    }
}

/// Settings for Sobel edge extraction.
///
/// # Threshold invariant
///
/// `low_threshold` must not exceed `high_threshold`. The invariant is
/// enforced at the export boundary; [`edge::detect`](crate::edge::detect)
/// additionally clamps `low` to `high` as defense in depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSettings {
    /// Gradient magnitudes at or above this are at least weak edges.
    pub low_threshold: u8,

    /// Gradient magnitudes at or above this are definite edges.
    pub high_threshold: u8,

    /// Thin edges by zeroing pixels that are not an 8-neighbor local
    /// maximum of the gradient strength map.
    pub suppress_non_maximum: bool,
}

impl EdgeSettings {
    /// Default low threshold.
    pub const DEFAULT_LOW_THRESHOLD: u8 = 50;
    /// Default high threshold.
    pub const DEFAULT_HIGH_THRESHOLD: u8 = 150;

    /// Derive edge thresholds from a binarization threshold.
    ///
    /// The default mapping used when the caller specifies only the
    /// threshold-mode cutoff: `low` at 40% of the cutoff, `high` at the
    /// cutoff itself.
    #[must_use]
    pub fn derived_from(threshold: u8) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let low = (f32::from(threshold) * 0.4) as u8;
        Self {
            low_threshold: low,
            high_threshold: threshold,
            suppress_non_maximum: true,
        }
    }
}

impl Default for EdgeSettings {
    fn default() -> Self {
        Self {
            low_threshold: Self::DEFAULT_LOW_THRESHOLD,
            high_threshold: Self::DEFAULT_HIGH_THRESHOLD,
            suppress_non_maximum: true,
        }
    }
}

/// Which binarization algorithm produces the stencil.
///
/// Resolved once at the export boundary; the pipeline never re-checks
/// the mode per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum StencilMode {
    /// Threshold binarization: solid fills, the default stencil style.
    Threshold(ThresholdSettings),
    /// Edge extraction: outline-only stencil.
    Edge(EdgeSettings),
}

impl StencilMode {
    /// Short name of the mode, for logging and display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Threshold(_) => "threshold",
            Self::Edge(_) => "edge",
        }
    }
}

impl Default for StencilMode {
    fn default() -> Self {
        Self::Threshold(ThresholdSettings::default())
    }
}

/// Errors that can occur during stencil processing.
#[derive(Debug, thiserror::Error)]
pub enum StencilError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptySource,

    /// A size key string did not name any catalog preset.
    #[error("unknown stencil size key: {key:?}")]
    UnknownSizeKey {
        /// The unrecognized key as supplied by the caller.
        key: String,
    },
}
