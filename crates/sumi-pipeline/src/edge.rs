//! Sobel edge extraction with local-maximum suppression and hysteresis
//! linking.
//!
//! Produces an outline-only stencil: white pixels (255) are edges, black
//! pixels (0) are background, alpha is carried over from the input.
//!
//! The detector is deliberately simpler than canonical Canny, matching
//! the visual behavior stencil artists already rely on:
//!
//! - no Gaussian pre-blur; the gradient is computed on the raw grayscale
//! - suppression keeps a pixel only if it is `>=` all 8 neighbors in the
//!   strength map (isotropic, not gradient-direction-aware)
//! - hysteresis linking is a single raster-order pass, not an iterative
//!   or breadth-first propagation; long chains of weak pixels that never
//!   touch a strong pixel stay unlinked

use crate::types::{EdgeSettings, GrayImage, RgbaImage};

/// Edge-strength value for a definite edge.
const STRONG: u8 = 255;
/// Internal marker for a weak (candidate) edge; never appears in output.
const WEAK: u8 = 128;

/// Detect edges, returning a binary stencil buffer.
///
/// Runs Sobel gradient magnitude, optional local-maximum suppression,
/// and double-threshold hysteresis in order. `low_threshold` is clamped
/// to at most `high_threshold` as defense in depth; the export boundary
/// rejects inverted threshold pairs before they reach this function.
///
/// Output pixels have `r == g == b`, each 0 or 255; alpha is copied from
/// the input. A uniform input produces an all-background output.
#[must_use = "returns the binary edge stencil"]
pub fn detect(image: &RgbaImage, settings: &EdgeSettings) -> RgbaImage {
    let gray = grayscale_average(image);
    let magnitude = sobel_magnitude(&gray);
    let thinned = if settings.suppress_non_maximum {
        suppress_local_maxima(&magnitude)
    } else {
        magnitude
    };
    let low = settings.low_threshold.min(settings.high_threshold);
    let linked = hysteresis(&thinned, low, settings.high_threshold);

    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let v = linked.get_pixel(x, y).0[0];
        let a = image.get_pixel(x, y).0[3];
        image::Rgba([v, v, v, a])
    })
}

/// Grayscale derivation: integer average of R, G, B per pixel.
///
/// The same averaging the threshold binarizer uses, so both stencil
/// modes agree on what "gray" means.
#[allow(clippy::cast_possible_truncation)]
fn grayscale_average(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let p = image.get_pixel(x, y).0;
        let sum = u16::from(p[0]) + u16::from(p[1]) + u16::from(p[2]);
        image::Luma([(sum / 3) as u8])
    })
}

/// Sobel gradient magnitude for interior pixels; borders stay 0.
///
/// Magnitude is `min(255, sqrt(gx^2 + gy^2))` with the standard 3x3
/// kernels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sobel_magnitude(gray: &GrayImage) -> GrayImage {
    let (w, h) = gray.dimensions();
    let mut out = GrayImage::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let p = |dx: u32, dy: u32| i32::from(gray.get_pixel(x + dx - 1, y + dy - 1).0[0]);

            // Gx = [[-1,0,1],[-2,0,2],[-1,0,1]]
            let gx = -p(0, 0) + p(2, 0) - 2 * p(0, 1) + 2 * p(2, 1) - p(0, 2) + p(2, 2);
            // Gy = [[-1,-2,-1],[0,0,0],[1,2,1]]
            let gy = -p(0, 0) - 2 * p(1, 0) - p(2, 0) + p(0, 2) + 2 * p(1, 2) + p(2, 2);

            let magnitude = f64::from(gx).hypot(f64::from(gy)).min(255.0);
            out.put_pixel(x, y, image::Luma([magnitude as u8]));
        }
    }
    out
}

/// Isotropic local-maximum suppression: an interior pixel survives only
/// if its strength is `>=` all 8 neighbors; everything else (borders
/// included) is zeroed.
fn suppress_local_maxima(magnitude: &GrayImage) -> GrayImage {
    let (w, h) = magnitude.dimensions();
    let mut out = GrayImage::new(w, h);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let v = magnitude.get_pixel(x, y).0[0];
            let neighbors = [
                magnitude.get_pixel(x - 1, y - 1).0[0],
                magnitude.get_pixel(x, y - 1).0[0],
                magnitude.get_pixel(x + 1, y - 1).0[0],
                magnitude.get_pixel(x - 1, y).0[0],
                magnitude.get_pixel(x + 1, y).0[0],
                magnitude.get_pixel(x - 1, y + 1).0[0],
                magnitude.get_pixel(x, y + 1).0[0],
                magnitude.get_pixel(x + 1, y + 1).0[0],
            ];
            if neighbors.iter().all(|&n| v >= n) {
                out.put_pixel(x, y, image::Luma([v]));
            }
        }
    }
    out
}

/// Double-threshold classification followed by one linking pass.
///
/// Classification marks each pixel strong ([`STRONG`]), weak ([`WEAK`]),
/// or background (0). The linking pass walks the map once in raster
/// order: a weak pixel with at least one strong 8-neighbor is promoted
/// to strong, all other weak pixels drop to background. Promotions
/// happen in place, so a promoted pixel can promote later neighbors
/// within the same pass, but there is no second pass.
fn hysteresis(strength: &GrayImage, low: u8, high: u8) -> GrayImage {
    let (w, h) = strength.dimensions();

    let mut map = GrayImage::from_fn(w, h, |x, y| {
        let v = strength.get_pixel(x, y).0[0];
        let class = if v >= high {
            STRONG
        } else if v >= low {
            WEAK
        } else {
            0
        };
        image::Luma([class])
    });

    for y in 0..h {
        for x in 0..w {
            if map.get_pixel(x, y).0[0] != WEAK {
                continue;
            }
            // Neighbor coordinates via wrapping_sub; out-of-bounds values
            // wrap to u32::MAX and fail the bounds check below.
            let neighbors = [
                (x.wrapping_sub(1), y.wrapping_sub(1)),
                (x, y.wrapping_sub(1)),
                (x + 1, y.wrapping_sub(1)),
                (x.wrapping_sub(1), y),
                (x + 1, y),
                (x.wrapping_sub(1), y + 1),
                (x, y + 1),
                (x + 1, y + 1),
            ];
            let promoted = neighbors.iter().any(|&(nx, ny)| {
                nx < w && ny < h && map.get_pixel(nx, ny).0[0] == STRONG
            });
            let class = if promoted { STRONG } else { 0 };
            map.put_pixel(x, y, image::Luma([class]));
        }
    }
    map
}
