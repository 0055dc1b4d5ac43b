//! sumi-export: paper fitting, metadata, and document assembly.
//!
//! Takes finished stencil buffers from `sumi-pipeline` and turns them
//! into deliverables: a PNG byte buffer, or a print-ready document with
//! the stencil placed at exact physical scale on a validated paper size.
//!
//! The document format is pluggable through [`DocumentBuilder`];
//! [`PdfStencilBuilder`] is the shipped implementation.

pub mod document;
pub mod error;
pub mod metadata;
pub mod orchestrator;
pub mod paper;

pub use document::{DocumentBuilder, PdfStencilBuilder};
pub use error::ExportError;
pub use metadata::{DesignInfo, ExportMetadata, OutputFormat, slugify, stencil_filename};
pub use orchestrator::{
    ExportedDocument, encode_png, generate_document, generate_raster, generate_raster_png,
    validate_mode,
};
pub use paper::{MARGIN_IN, PaperKey, PaperSelection, PaperSize, Unit, validate_fit};
