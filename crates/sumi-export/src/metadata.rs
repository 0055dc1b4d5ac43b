//! Export metadata and output filename derivation.
//!
//! Every document export carries an [`ExportMetadata`] record: the
//! design identity, physical dimensions at the reference resolution,
//! the output format, and when the export happened. Metadata is built
//! once per export call and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Raw raster stencil.
    Png,
    /// Print-ready document.
    Pdf,
}

impl OutputFormat {
    /// File extension for this format, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }
}

/// Caller-supplied description of the design being exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignInfo {
    /// Design name; used for metadata and the output filename.
    pub name: String,
    /// Artist credited with the design.
    pub artist_name: Option<String>,
    /// Free-form notes from the artist.
    pub artist_notes: Option<String>,
}

impl DesignInfo {
    /// A design with only a name.
    #[must_use]
    pub const fn named(name: String) -> Self {
        Self {
            name,
            artist_name: None,
            artist_notes: None,
        }
    }
}

/// Metadata attached to an exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Design name.
    pub design_name: String,
    /// Unique id minted for this export.
    pub design_id: Uuid,
    /// Physical design width in inches.
    pub width_in: f64,
    /// Physical design height in inches.
    pub height_in: f64,
    /// Print resolution the dimensions are stated at.
    pub dpi: u32,
    /// Output format of the export.
    pub format: OutputFormat,
    /// Key of the paper size the document targets.
    pub paper_size_key: String,
    /// When the export was produced.
    pub created_at: DateTime<Utc>,
    /// Free-form notes from the artist.
    pub artist_notes: Option<String>,
    /// Artist credited with the design.
    pub artist_name: Option<String>,
}

/// Reduce a design name to a filename-safe slug.
///
/// Alphanumeric runs are lowercased and joined by single hyphens;
/// everything else is dropped. An empty result falls back to
/// `"stencil"`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "stencil".to_string()
    } else {
        slug
    }
}

/// Derive the output filename for an export:
/// `<slug(design_name)>-<width_in>in.<ext>`.
///
/// Whole-inch widths are rendered without a decimal point.
#[must_use]
pub fn stencil_filename(design_name: &str, width_in: f64, format: OutputFormat) -> String {
    let width = if width_in.fract().abs() < f64::EPSILON {
        format!("{width_in:.0}")
    } else {
        format!("{width_in}")
    };
    format!(
        "{}-{width}in.{}",
        slugify(design_name),
        format.extension(),
    )
}
