//! Document-builder contract and the PDF default implementation.
//!
//! The export orchestrator hands a finished stencil, resolved paper
//! dimensions, and assembled metadata to a [`DocumentBuilder`] and gets
//! back an encoded document byte blob. [`PdfStencilBuilder`] is the
//! implementation shipped with sumi, built on `printpdf` 0.8's
//! data-oriented API: a single page at the exact paper size with the
//! stencil placed centered at its exact physical scale.

use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use sumi_pipeline::RgbaImage;
use tracing::debug;

use crate::error::ExportError;
use crate::metadata::{ExportMetadata, OutputFormat};
use crate::paper::PaperSize;

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

/// Assembles a print-ready document from a finished stencil.
///
/// Implementations place the stencil centered on the page at its exact
/// physical scale and embed the supplied metadata. Failures are opaque
/// to the orchestrator and propagate unmodified as
/// [`ExportError::Builder`].
pub trait DocumentBuilder {
    /// Output format of documents produced by this builder.
    fn format(&self) -> OutputFormat;

    /// Assemble the document.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Builder`] if assembly fails.
    fn build(
        &self,
        stencil: &RgbaImage,
        paper: &PaperSize,
        metadata: &ExportMetadata,
    ) -> Result<Vec<u8>, ExportError>;
}

/// PDF document builder: one page at the exact paper size, stencil
/// centered at exact physical scale, design name as the document title.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfStencilBuilder;

impl DocumentBuilder for PdfStencilBuilder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn build(
        &self,
        stencil: &RgbaImage,
        paper: &PaperSize,
        metadata: &ExportMetadata,
    ) -> Result<Vec<u8>, ExportError> {
        let page_w = Mm(paper.width_in as f32 * MM_PER_INCH);
        let page_h = Mm(paper.height_in as f32 * MM_PER_INCH);

        let rgb = DynamicImage::ImageRgba8(stencil.clone()).to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: stencil.width() as usize,
            height: stencil.height() as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(&metadata.design_name);
        let xobject_id = doc.add_image(&raw);

        // Physical placement: the stencil's native size at its stated
        // DPI, centered on the page. No scale-to-fit — the fit validator
        // has already guaranteed the design fits with margins.
        let dpi = metadata.dpi as f32;
        let img_w_pt = stencil.width() as f32 / dpi * PT_PER_INCH;
        let img_h_pt = stencil.height() as f32 / dpi * PT_PER_INCH;
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let x_offset = (page_w_pt - img_w_pt) / 2.0;
        let y_offset = (page_h_pt - img_h_pt) / 2.0;

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x_offset)),
                translate_y: Some(Pt(y_offset)),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                dpi: Some(dpi),
                rotate: None,
            },
        }];

        let page = PdfPage::new(page_w, page_h, ops);
        doc.with_pages(vec![page]);

        debug!(
            img_w_pt,
            img_h_pt,
            page_w_pt,
            page_h_pt,
            "stencil placed on page"
        );

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }
}
