//! Unified error type for stencil export.

use sumi_pipeline::StencilError;

/// Errors that can occur while exporting a stencil.
///
/// Every variant is terminal for the current export call: nothing is
/// retried internally, and no partial output is ever returned. Variants
/// carry enough structured detail (field name, offending value) for the
/// caller to render a user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The stencil pipeline rejected the input.
    #[error(transparent)]
    Stencil(#[from] StencilError),

    /// A settings field was outside its valid range.
    #[error("invalid {field}: {value} (expected {expected})")]
    InvalidSetting {
        /// Name of the offending settings field.
        field: &'static str,
        /// The rejected value, rendered for display.
        value: String,
        /// Human-readable description of the valid range.
        expected: &'static str,
    },

    /// Edge thresholds were supplied in the wrong order.
    #[error("edge low threshold {low} exceeds high threshold {high}")]
    ThresholdOrder {
        /// The supplied low threshold.
        low: u8,
        /// The supplied high threshold.
        high: u8,
    },

    /// A paper key string did not name any preset.
    #[error("unknown paper size key: {key:?}")]
    UnknownPaperKey {
        /// The unrecognized key as supplied by the caller.
        key: String,
    },

    /// A custom paper dimension was not a positive finite number.
    #[error("invalid paper {field}: {value} (expected a positive finite number)")]
    InvalidPaperDimension {
        /// Which dimension was rejected.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The design plus its margin does not fit the chosen paper.
    #[error(
        "design requires {required_width_in:.2}x{required_height_in:.2}in \
         including margins, but {paper_name} is \
         {paper_width_in:.2}x{paper_height_in:.2}in"
    )]
    DesignExceedsPaper {
        /// Width the design needs, margins included.
        required_width_in: f64,
        /// Height the design needs, margins included.
        required_height_in: f64,
        /// Display name of the rejected paper size.
        paper_name: &'static str,
        /// Paper width in inches.
        paper_width_in: f64,
        /// Paper height in inches.
        paper_height_in: f64,
    },

    /// The document builder failed; the message is opaque to this crate.
    #[error("document assembly failed: {0}")]
    Builder(String),

    /// Encoding the stencil image failed.
    #[error("failed to encode stencil image: {0}")]
    Encode(image::ImageError),
}
