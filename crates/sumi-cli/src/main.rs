//! sumi: command-line stencil exporter.
//!
//! Converts a tattoo design image into a print-ready stencil: either a
//! raw PNG at the chosen physical size, or a PDF document with the
//! stencil placed centered at exact physical scale on a validated paper
//! size.
//!
//! # Usage
//!
//! ```text
//! sumi design.png --size medium --out stencil.png
//! sumi design.png --size medium --mode edge --pdf --paper letter
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use sumi_export::{
    DesignInfo, ExportError, PaperKey, PaperSelection, PdfStencilBuilder, Unit,
    generate_document, generate_raster_png, stencil_filename,
};
use sumi_pipeline::{EdgeSettings, SizeKey, StencilMode, ThresholdSettings};

/// Convert a tattoo design image into a print-ready transfer stencil.
///
/// The raster path writes a square PNG at the chosen physical size
/// (300 DPI). The `--pdf` path additionally validates the design
/// against a paper size and writes a single-page document with the
/// stencil at exact physical scale.
#[derive(Parser)]
#[command(name = "sumi", version)]
struct Cli {
    /// Path to the input design image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Stencil size preset.
    #[arg(long, value_enum, default_value_t = Size::Medium)]
    size: Size,

    /// Stencil generation mode.
    #[arg(long, value_enum, default_value_t = Mode::Threshold)]
    mode: Mode,

    /// Binarization cutoff (0-255).
    #[arg(long, default_value_t = ThresholdSettings::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Contrast multiplier (0.1-5.0).
    #[arg(long, default_value_t = ThresholdSettings::DEFAULT_CONTRAST)]
    contrast: f32,

    /// Brightness offset (-255 to 255).
    #[arg(long, default_value_t = ThresholdSettings::DEFAULT_BRIGHTNESS, allow_negative_numbers = true)]
    brightness: i16,

    /// Invert the stencil (white-on-black).
    #[arg(long)]
    invert: bool,

    /// Edge-mode low threshold; defaults to 40% of --threshold.
    #[arg(long)]
    edge_low: Option<u8>,

    /// Edge-mode high threshold; defaults to --threshold.
    #[arg(long)]
    edge_high: Option<u8>,

    /// Disable local-maximum suppression in edge mode.
    #[arg(long)]
    no_nms: bool,

    /// Export a PDF document instead of a raw PNG stencil.
    #[arg(long)]
    pdf: bool,

    /// Paper size preset for --pdf.
    #[arg(long, value_enum, default_value_t = Paper::Letter)]
    paper: Paper,

    /// Custom paper width (overrides --paper; requires --paper-height).
    #[arg(long, requires = "paper_height")]
    paper_width: Option<f64>,

    /// Custom paper height (requires --paper-width).
    #[arg(long, requires = "paper_width")]
    paper_height: Option<f64>,

    /// Unit for custom paper dimensions.
    #[arg(long, value_enum, default_value_t = PaperUnit::Inches)]
    paper_unit: PaperUnit,

    /// Design name used for metadata and the derived filename.
    #[arg(long, default_value = "stencil")]
    design_name: String,

    /// Artist name embedded in document metadata.
    #[arg(long)]
    artist: Option<String>,

    /// Artist notes embedded in document metadata.
    #[arg(long)]
    notes: Option<String>,

    /// Output path; defaults to the derived stencil filename.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print export metadata as JSON to stdout (--pdf only).
    #[arg(long)]
    dump_metadata: bool,
}

/// Stencil size preset selection.
#[derive(Clone, Copy, ValueEnum)]
enum Size {
    /// 4 inch.
    Small,
    /// 6 inch.
    Medium,
    /// 8 inch.
    Large,
    /// 10 inch.
    Xlarge,
}

impl From<Size> for SizeKey {
    fn from(size: Size) -> Self {
        match size {
            Size::Small => Self::Small,
            Size::Medium => Self::Medium,
            Size::Large => Self::Large,
            Size::Xlarge => Self::Xlarge,
        }
    }
}

/// Stencil generation mode selection.
#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Threshold binarization: solid fills.
    Threshold,
    /// Edge extraction: outlines only.
    Edge,
}

/// Paper size preset selection.
#[derive(Clone, Copy, ValueEnum)]
enum Paper {
    /// US Letter, 8.5 x 11 in.
    Letter,
    /// US Legal, 8.5 x 14 in.
    Legal,
    /// Tabloid, 11 x 17 in.
    Tabloid,
    /// ISO A4.
    A4,
    /// ISO A5.
    A5,
}

impl From<Paper> for PaperKey {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::Letter => Self::Letter,
            Paper::Legal => Self::Legal,
            Paper::Tabloid => Self::Tabloid,
            Paper::A4 => Self::A4,
            Paper::A5 => Self::A5,
        }
    }
}

/// Custom paper dimension unit selection.
#[derive(Clone, Copy, ValueEnum)]
enum PaperUnit {
    /// Inches.
    Inches,
    /// Centimeters.
    Cm,
    /// Millimeters.
    Mm,
}

impl From<PaperUnit> for Unit {
    fn from(unit: PaperUnit) -> Self {
        match unit {
            PaperUnit::Inches => Self::Inches,
            PaperUnit::Cm => Self::Centimeters,
            PaperUnit::Mm => Self::Millimeters,
        }
    }
}

/// Build the stencil mode from CLI arguments.
fn mode_from_cli(cli: &Cli) -> StencilMode {
    match cli.mode {
        Mode::Threshold => StencilMode::Threshold(ThresholdSettings {
            threshold: cli.threshold,
            contrast: cli.contrast,
            brightness: cli.brightness,
            invert: cli.invert,
        }),
        Mode::Edge => {
            let derived = EdgeSettings::derived_from(cli.threshold);
            StencilMode::Edge(EdgeSettings {
                low_threshold: cli.edge_low.unwrap_or(derived.low_threshold),
                high_threshold: cli.edge_high.unwrap_or(derived.high_threshold),
                suppress_non_maximum: !cli.no_nms,
            })
        }
    }
}

/// Build the paper selection from CLI arguments.
fn paper_from_cli(cli: &Cli) -> PaperSelection {
    match (cli.paper_width, cli.paper_height) {
        (Some(width), Some(height)) => PaperSelection::Custom {
            width,
            height,
            unit: cli.paper_unit.into(),
        },
        _ => PaperSelection::Preset {
            key: cli.paper.into(),
        },
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let image_bytes = match std::fs::read(&cli.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("error reading {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };

    let mode = mode_from_cli(&cli);
    let size: SizeKey = cli.size.into();

    if cli.pdf {
        export_document(&cli, &image_bytes, size, &mode)
    } else {
        export_png(&cli, &image_bytes, size, &mode)
    }
}

/// Raster path: write the stencil PNG.
fn export_png(cli: &Cli, image_bytes: &[u8], size: SizeKey, mode: &StencilMode) -> ExitCode {
    let mut report = progress_reporter();
    let result = generate_raster_png(image_bytes, size, mode, Some(&mut report));
    eprintln!();

    let bytes = match result {
        Ok(bytes) => bytes,
        Err(e) => return report_error(&e),
    };

    let filename = stencil_filename(
        &cli.design_name,
        sumi_pipeline::SizePreset::resolve(size).inches,
        sumi_export::OutputFormat::Png,
    );
    let path = cli.out.clone().unwrap_or_else(|| PathBuf::from(filename));

    if let Err(e) = std::fs::write(&path, &bytes) {
        eprintln!("error writing {}: {e}", path.display());
        return ExitCode::FAILURE;
    }
    println!("{}", path.display());
    ExitCode::SUCCESS
}

/// Document path: validate paper fit and write the PDF.
fn export_document(cli: &Cli, image_bytes: &[u8], size: SizeKey, mode: &StencilMode) -> ExitCode {
    let design = DesignInfo {
        name: cli.design_name.clone(),
        artist_name: cli.artist.clone(),
        artist_notes: cli.notes.clone(),
    };

    let exported = match generate_document(
        image_bytes,
        size,
        mode,
        paper_from_cli(cli),
        design,
        &PdfStencilBuilder,
    ) {
        Ok(exported) => exported,
        Err(e) => return report_error(&e),
    };

    if cli.dump_metadata {
        match serde_json::to_string_pretty(&exported.metadata) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error serializing metadata: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let path = cli
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&exported.filename));

    if let Err(e) = std::fs::write(&path, &exported.bytes) {
        eprintln!("error writing {}: {e}", path.display());
        return ExitCode::FAILURE;
    }
    println!("{}", path.display());
    ExitCode::SUCCESS
}

/// Progress reporter writing a percentage to stderr in place.
fn progress_reporter() -> impl FnMut(f32) {
    |fraction: f32| {
        eprint!("\rprocessing {:>5.1}%", f64::from(fraction) * 100.0);
        let _ = std::io::stderr().flush();
    }
}

/// Print an export error and return the failure exit code.
fn report_error(error: &ExportError) -> ExitCode {
    eprintln!("error: {error}");
    ExitCode::FAILURE
}
