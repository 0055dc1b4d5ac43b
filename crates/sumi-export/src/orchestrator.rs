//! Export orchestration: resize, binarize, validate fit, encode.
//!
//! The orchestrator runs the four export stages in order -- resize,
//! binarization (threshold or edge), paper-fit validation (document path
//! only), and encoding -- with a hard stop on the first error. Settings
//! are validated once at entry; the stencil mode is a tagged enum, never
//! re-checked per pixel. Each call owns its pixel buffer for the whole
//! run; concurrent exports never share state.

use sumi_pipeline::{
    Dimensions, ProgressFn, RgbaImage, SizeKey, SizePreset, StencilMode, ThresholdSettings,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::document::DocumentBuilder;
use crate::error::ExportError;
use crate::metadata::{DesignInfo, ExportMetadata, stencil_filename};
use crate::paper::{PaperSelection, validate_fit};

/// A finished document export: the encoded bytes, the derived filename,
/// and the metadata embedded in the document.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// Encoded document bytes.
    pub bytes: Vec<u8>,
    /// Derived filename: `<slug(design_name)>-<width_in>in.<ext>`.
    pub filename: String,
    /// Metadata attached to the document.
    pub metadata: ExportMetadata,
}

/// Validate mode settings at the export boundary.
///
/// The pipeline itself clamps defensively and never fails; this is where
/// out-of-range settings are rejected with structured detail instead.
///
/// # Errors
///
/// Returns [`ExportError::InvalidSetting`] for a contrast or brightness
/// value outside its documented range, and
/// [`ExportError::ThresholdOrder`] when the edge low threshold exceeds
/// the high threshold.
pub fn validate_mode(mode: &StencilMode) -> Result<(), ExportError> {
    match mode {
        StencilMode::Threshold(settings) => {
            if !settings.contrast.is_finite()
                || settings.contrast < ThresholdSettings::MIN_CONTRAST
                || settings.contrast > ThresholdSettings::MAX_CONTRAST
            {
                return Err(ExportError::InvalidSetting {
                    field: "contrast",
                    value: settings.contrast.to_string(),
                    expected: "0.1 to 5.0",
                });
            }
            if settings.brightness < ThresholdSettings::MIN_BRIGHTNESS
                || settings.brightness > ThresholdSettings::MAX_BRIGHTNESS
            {
                return Err(ExportError::InvalidSetting {
                    field: "brightness",
                    value: settings.brightness.to_string(),
                    expected: "-255 to 255",
                });
            }
            Ok(())
        }
        StencilMode::Edge(settings) => {
            if settings.low_threshold > settings.high_threshold {
                return Err(ExportError::ThresholdOrder {
                    low: settings.low_threshold,
                    high: settings.high_threshold,
                });
            }
            Ok(())
        }
    }
}

/// Generate a processed stencil buffer without paper constraints.
///
/// Runs resize and the selected binarization mode. Progress lands in the
/// first ~30% of the reported range for the resize stage and the
/// remaining ~70% for binarization.
///
/// # Errors
///
/// Returns [`ExportError::InvalidSetting`] or
/// [`ExportError::ThresholdOrder`] for out-of-range settings, and
/// [`ExportError::Stencil`] for empty or undecodable input.
#[instrument(
    skip(image_bytes, mode, on_progress),
    fields(bytes_len = image_bytes.len(), size = %size, mode = mode.label())
)]
pub fn generate_raster(
    image_bytes: &[u8],
    size: SizeKey,
    mode: &StencilMode,
    on_progress: Option<&mut ProgressFn<'_>>,
) -> Result<RgbaImage, ExportError> {
    validate_mode(mode)?;
    let stencil = sumi_pipeline::process(image_bytes, size, mode, on_progress)?;
    let dims = Dimensions::of(&stencil);
    debug!(
        width = dims.width,
        height = dims.height,
        pixels = dims.pixel_count(),
        "stencil raster complete"
    );
    Ok(stencil)
}

/// Like [`generate_raster`], PNG-encoded.
///
/// # Errors
///
/// As [`generate_raster`], plus [`ExportError::Encode`] if PNG encoding
/// fails.
pub fn generate_raster_png(
    image_bytes: &[u8],
    size: SizeKey,
    mode: &StencilMode,
    on_progress: Option<&mut ProgressFn<'_>>,
) -> Result<Vec<u8>, ExportError> {
    let stencil = generate_raster(image_bytes, size, mode, on_progress)?;
    encode_png(&stencil)
}

/// Encode an RGBA buffer as PNG bytes.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the encoder fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )
    .map_err(ExportError::Encode)?;
    Ok(buf)
}

/// Generate a print-ready document.
///
/// Runs the raster pipeline, resolves the paper selection, validates
/// that the design plus margins fits the page, assembles metadata, and
/// delegates to the document builder. Returns the document bytes along
/// with the derived filename and the metadata.
///
/// # Errors
///
/// Propagates every stage's error unmodified: settings validation,
/// stencil processing, paper resolution, fit validation
/// ([`ExportError::DesignExceedsPaper`]), and builder failures
/// ([`ExportError::Builder`]). Nothing is retried.
#[instrument(
    skip(image_bytes, mode, paper, design, builder),
    fields(bytes_len = image_bytes.len(), size = %size, mode = mode.label(), design = %design.name)
)]
pub fn generate_document<B: DocumentBuilder>(
    image_bytes: &[u8],
    size: SizeKey,
    mode: &StencilMode,
    paper: PaperSelection,
    design: DesignInfo,
    builder: &B,
) -> Result<ExportedDocument, ExportError> {
    validate_mode(mode)?;
    let preset = SizePreset::resolve(size);
    let stencil = sumi_pipeline::process(image_bytes, size, mode, None)?;

    let paper_size = paper.resolve()?;
    validate_fit(preset.inches, preset.inches, &paper_size)?;

    let metadata = ExportMetadata {
        design_name: design.name,
        design_id: Uuid::new_v4(),
        width_in: preset.inches,
        height_in: preset.inches,
        dpi: sumi_pipeline::REFERENCE_DPI,
        format: builder.format(),
        paper_size_key: paper_size.key.to_string(),
        created_at: chrono::Utc::now(),
        artist_notes: design.artist_notes,
        artist_name: design.artist_name,
    };

    let bytes = builder.build(&stencil, &paper_size, &metadata)?;
    let filename = stencil_filename(&metadata.design_name, metadata.width_in, metadata.format);

    info!(
        %filename,
        paper = paper_size.key,
        bytes = bytes.len(),
        "document export complete"
    );

    Ok(ExportedDocument {
        bytes,
        filename,
        metadata,
    })
}
