//! Threshold binarization: grayscale, brightness/contrast, cutoff.
//!
//! Converts the working buffer into a pure black/white stencil in place.
//! Per pixel: the gray value is the integer average of R, G, B; the
//! brightness offset is added; contrast is applied about mid-gray (128);
//! the result is clamped to `[0, 255]` and compared against the cutoff.
//! Alpha is never touched.
//!
//! Large buffers are processed in fixed-size blocks with a progress
//! callback after each block, so a caller driving a UI can surface
//! incremental progress. Chunking is purely a scheduling courtesy: the
//! output is byte-identical to a single-pass run.

use crate::progress::ProgressFn;
use crate::types::{RgbaImage, ThresholdSettings};

/// Pixel-count bound above which [`apply`] switches to chunked
/// execution (a 2400 x 2400 canvas).
pub const CHUNK_ACTIVATION_PIXELS: u64 = 2400 * 2400;

/// Pixels per block when chunked execution is active.
pub const CHUNK_PIXELS: usize = 120_000;

const BYTES_PER_PIXEL: usize = 4;

/// Binarize the buffer in place.
///
/// Buffers above [`CHUNK_ACTIVATION_PIXELS`] are processed in
/// [`CHUNK_PIXELS`] blocks with `on_progress(processed / total)` after
/// each block; smaller buffers are processed in one pass with a single
/// `1.0` progress call at completion. Reported fractions are
/// non-decreasing either way. Never fails.
pub fn apply(
    image: &mut RgbaImage,
    settings: &ThresholdSettings,
    mut on_progress: Option<&mut ProgressFn<'_>>,
) {
    let total_pixels = u64::from(image.width()) * u64::from(image.height());

    if needs_chunking(total_pixels) {
        run_chunked(image, total_pixels, settings, CHUNK_PIXELS, on_progress);
    } else {
        binarize_block(image, settings);
        if let Some(cb) = on_progress.as_mut() {
            cb(1.0);
        }
    }
}

/// Whether a buffer of `total_pixels` takes the chunked path.
const fn needs_chunking(total_pixels: u64) -> bool {
    total_pixels > CHUNK_ACTIVATION_PIXELS
}

/// Process the buffer block by block, reporting progress after each.
fn run_chunked(
    buffer: &mut [u8],
    total_pixels: u64,
    settings: &ThresholdSettings,
    chunk_pixels: usize,
    mut on_progress: Option<&mut ProgressFn<'_>>,
) {
    let mut processed: u64 = 0;
    for block in buffer.chunks_mut(chunk_pixels * BYTES_PER_PIXEL) {
        binarize_block(block, settings);
        processed += (block.len() / BYTES_PER_PIXEL) as u64;
        if let Some(cb) = on_progress.as_mut() {
            #[allow(clippy::cast_precision_loss)]
            cb(processed as f32 / total_pixels as f32);
        }
    }
}

/// Binarize a run of RGBA pixels in place.
fn binarize_block(pixels: &mut [u8], settings: &ThresholdSettings) {
    for px in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
        let gray = (u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2])) / 3;
        let adjusted = f32::from(gray) + f32::from(settings.brightness);
        let adjusted = (adjusted - 128.0).mul_add(settings.contrast, 128.0);
        let adjusted = adjusted.clamp(0.0, 255.0);
        let bit: u8 = if adjusted >= f32::from(settings.threshold) {
            255
        } else {
            0
        };
        let value = if settings.invert { 255 - bit } else { bit };
        px[0] = value;
        px[1] = value;
        px[2] = value;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Gradient test image with varying alpha.
    fn gradient_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let r = u8::try_from(x * 13 % 256).unwrap();
            let g = u8::try_from(y * 7 % 256).unwrap();
            let b = u8::try_from((x + y) * 5 % 256).unwrap();
            let a = u8::try_from((x * y) % 256).unwrap();
            image::Rgba([r, g, b, a])
        })
    }

    #[test]
    fn output_is_binary_with_equal_channels() {
        let mut img = gradient_image(32, 32);
        apply(&mut img, &ThresholdSettings::default(), None);
        for pixel in img.pixels() {
            let [r, g, b, _] = pixel.0;
            assert_eq!(r, g);
            assert_eq!(g, b);
            assert!(r == 0 || r == 255, "expected 0 or 255, got {r}");
        }
    }

    #[test]
    fn alpha_is_untouched() {
        let source = gradient_image(32, 32);
        let mut img = source.clone();
        apply(&mut img, &ThresholdSettings::default(), None);
        for (before, after) in source.pixels().zip(img.pixels()) {
            assert_eq!(before.0[3], after.0[3]);
        }
    }

    #[test]
    fn bright_gray_maps_to_white_dark_gray_to_black() {
        // With default settings: (200 - 128) * 1.2 + 128 = 214.4 >= 128,
        // while (50 - 128) * 1.2 + 128 = 34.4 < 128.
        let mut img = RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgba([200, 200, 200, 255])
            } else {
                image::Rgba([50, 50, 50, 255])
            }
        });
        apply(&mut img, &ThresholdSettings::default(), None);
        assert_eq!(img.get_pixel(0, 0).0[0], 255);
        assert_eq!(img.get_pixel(1, 0).0[0], 0);
    }

    #[test]
    fn brightness_shifts_the_cutoff() {
        // Gray 100 falls below the default cutoff, but +50 brightness
        // lifts it above: (150 - 128) * 1.2 + 128 = 154.4.
        let make = || RgbaImage::from_pixel(1, 1, image::Rgba([100, 100, 100, 255]));

        let mut plain = make();
        apply(&mut plain, &ThresholdSettings::default(), None);
        assert_eq!(plain.get_pixel(0, 0).0[0], 0);

        let mut brightened = make();
        let settings = ThresholdSettings {
            brightness: 50,
            ..ThresholdSettings::default()
        };
        apply(&mut brightened, &settings, None);
        assert_eq!(brightened.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn invert_is_exact_complement() {
        let source = gradient_image(24, 24);

        let mut plain = source.clone();
        apply(&mut plain, &ThresholdSettings::default(), None);

        let mut inverted = source;
        let settings = ThresholdSettings {
            invert: true,
            ..ThresholdSettings::default()
        };
        apply(&mut inverted, &settings, None);

        for (a, b) in plain.pixels().zip(inverted.pixels()) {
            assert_eq!(a.0[0], 255 - b.0[0]);
            assert_eq!(a.0[1], 255 - b.0[1]);
            assert_eq!(a.0[2], 255 - b.0[2]);
            assert_eq!(a.0[3], b.0[3]);
        }
    }

    #[test]
    fn chunked_output_is_identical_to_single_pass() {
        let source = gradient_image(40, 40);
        let settings = ThresholdSettings::default();

        let mut whole = source.clone();
        binarize_block(&mut whole, &settings);

        // Force chunked execution with a tiny block size so the
        // equivalence is exercised without a multi-megapixel buffer.
        let mut chunked = source;
        let total = u64::from(chunked.width()) * u64::from(chunked.height());
        run_chunked(&mut chunked, total, &settings, 33, None);

        assert_eq!(whole.as_raw(), chunked.as_raw());
    }

    #[test]
    fn chunked_progress_is_monotonic_and_completes() {
        let mut img = gradient_image(40, 40);
        let total = u64::from(img.width()) * u64::from(img.height());
        let mut seen = Vec::new();
        let mut sink = |f: f32| seen.push(f);
        run_chunked(
            &mut img,
            total,
            &ThresholdSettings::default(),
            100,
            Some(&mut sink),
        );

        assert!(seen.len() > 1, "expected multiple progress reports");
        assert!(
            seen.windows(2).all(|w| w[0] <= w[1]),
            "progress must be non-decreasing: {seen:?}",
        );
        assert!((seen.last().copied().unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn small_buffer_reports_single_completion() {
        let mut img = gradient_image(8, 8);
        let mut seen = Vec::new();
        let mut sink = |f: f32| seen.push(f);
        apply(&mut img, &ThresholdSettings::default(), Some(&mut sink));
        assert_eq!(seen, vec![1.0]);
    }

    #[test]
    fn chunking_activates_above_bound() {
        assert!(!needs_chunking(CHUNK_ACTIVATION_PIXELS));
        assert!(needs_chunking(CHUNK_ACTIVATION_PIXELS + 1));
        assert!(!needs_chunking(0));
    }

    #[test]
    fn contrast_extremes_stay_binary() {
        for contrast in [
            ThresholdSettings::MIN_CONTRAST,
            ThresholdSettings::MAX_CONTRAST,
        ] {
            let mut img = gradient_image(16, 16);
            let settings = ThresholdSettings {
                contrast,
                ..ThresholdSettings::default()
            };
            apply(&mut img, &settings, None);
            for pixel in img.pixels() {
                let v = pixel.0[0];
                assert!(v == 0 || v == 255);
            }
        }
    }
}
