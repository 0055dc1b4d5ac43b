//! Paper sizes, unit conversion, and the design-fit validator.
//!
//! Paper is either one of a small preset table or a custom size supplied
//! with an explicit unit. Dimensions are normalized to inches at
//! construction; every downstream physical computation is inch/DPI
//! based.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Fixed margin required on every side of the design, in inches.
pub const MARGIN_IN: f64 = 0.25;

const MM_PER_INCH: f64 = 25.4;
const CM_PER_INCH: f64 = 2.54;

/// Length unit for custom paper dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Unit {
    /// Inches.
    Inches,
    /// Centimeters.
    Centimeters,
    /// Millimeters.
    Millimeters,
}

impl Unit {
    /// Convert a value in this unit to inches.
    #[must_use]
    pub fn to_inches(self, value: f64) -> f64 {
        match self {
            Self::Inches => value,
            Self::Centimeters => value / CM_PER_INCH,
            Self::Millimeters => value / MM_PER_INCH,
        }
    }
}

/// Key naming one of the paper size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaperKey {
    /// US Letter, 8.5 x 11 in.
    Letter,
    /// US Legal, 8.5 x 14 in.
    Legal,
    /// Tabloid, 11 x 17 in.
    Tabloid,
    /// ISO A4, 210 x 297 mm.
    A4,
    /// ISO A5, 148 x 210 mm.
    A5,
}

impl PaperKey {
    /// All paper keys.
    pub const ALL: [Self; 5] = [Self::Letter, Self::Legal, Self::Tabloid, Self::A4, Self::A5];

    /// The preset key string for this paper size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Legal => "legal",
            Self::Tabloid => "tabloid",
            Self::A4 => "a4",
            Self::A5 => "a5",
        }
    }
}

impl fmt::Display for PaperKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperKey {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            "tabloid" => Ok(Self::Tabloid),
            "a4" => Ok(Self::A4),
            "a5" => Ok(Self::A5),
            other => Err(ExportError::UnknownPaperKey {
                key: other.to_string(),
            }),
        }
    }
}

/// Resolved paper dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    /// Preset key, or `"custom"` for caller-supplied dimensions.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Page width in inches.
    pub width_in: f64,
    /// Page height in inches.
    pub height_in: f64,
}

impl PaperSize {
    /// Look up a preset paper size.
    #[must_use]
    pub fn preset(key: PaperKey) -> Self {
        match key {
            PaperKey::Letter => Self {
                key: key.as_str(),
                name: "US Letter",
                width_in: 8.5,
                height_in: 11.0,
            },
            PaperKey::Legal => Self {
                key: key.as_str(),
                name: "US Legal",
                width_in: 8.5,
                height_in: 14.0,
            },
            PaperKey::Tabloid => Self {
                key: key.as_str(),
                name: "Tabloid",
                width_in: 11.0,
                height_in: 17.0,
            },
            PaperKey::A4 => Self {
                key: key.as_str(),
                name: "A4",
                width_in: 210.0 / MM_PER_INCH,
                height_in: 297.0 / MM_PER_INCH,
            },
            PaperKey::A5 => Self {
                key: key.as_str(),
                name: "A5",
                width_in: 148.0 / MM_PER_INCH,
                height_in: 210.0 / MM_PER_INCH,
            },
        }
    }

    /// Build a custom paper size, converting to inches.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidPaperDimension`] if either
    /// dimension is not a positive finite number.
    pub fn custom(width: f64, height: f64, unit: Unit) -> Result<Self, ExportError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ExportError::InvalidPaperDimension {
                field: "width",
                value: width,
            });
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(ExportError::InvalidPaperDimension {
                field: "height",
                value: height,
            });
        }
        Ok(Self {
            key: "custom",
            name: "Custom",
            width_in: unit.to_inches(width),
            height_in: unit.to_inches(height),
        })
    }
}

/// Paper chosen by the caller: a preset key or custom dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "paper", rename_all = "kebab-case")]
pub enum PaperSelection {
    /// One of the preset sizes.
    Preset {
        /// The preset key.
        key: PaperKey,
    },
    /// Custom dimensions with an explicit unit.
    Custom {
        /// Page width in `unit`.
        width: f64,
        /// Page height in `unit`.
        height: f64,
        /// Unit of both dimensions.
        unit: Unit,
    },
}

impl PaperSelection {
    /// Resolve the selection to concrete inch dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidPaperDimension`] for non-positive
    /// or non-finite custom dimensions.
    pub fn resolve(self) -> Result<PaperSize, ExportError> {
        match self {
            Self::Preset { key } => Ok(PaperSize::preset(key)),
            Self::Custom {
                width,
                height,
                unit,
            } => PaperSize::custom(width, height, unit),
        }
    }
}

/// Check that a design of the given physical size fits the paper.
///
/// The design needs [`MARGIN_IN`] of clearance on every side, so the
/// required page size is the design size plus twice the margin on each
/// axis.
///
/// # Errors
///
/// Returns [`ExportError::DesignExceedsPaper`] if the required size
/// exceeds the page on either axis.
pub fn validate_fit(
    design_width_in: f64,
    design_height_in: f64,
    paper: &PaperSize,
) -> Result<(), ExportError> {
    let required_width_in = 2.0f64.mul_add(MARGIN_IN, design_width_in);
    let required_height_in = 2.0f64.mul_add(MARGIN_IN, design_height_in);

    if required_width_in > paper.width_in || required_height_in > paper.height_in {
        return Err(ExportError::DesignExceedsPaper {
            required_width_in,
            required_height_in,
            paper_name: paper.name,
            paper_width_in: paper.width_in,
            paper_height_in: paper.height_in,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn letter_preset_dimensions() {
        let letter = PaperSize::preset(PaperKey::Letter);
        assert_eq!(letter.key, "letter");
        assert!((letter.width_in - 8.5).abs() < f64::EPSILON);
        assert!((letter.height_in - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn a4_preset_converts_from_millimeters() {
        let a4 = PaperSize::preset(PaperKey::A4);
        assert!((a4.width_in - 8.267_716).abs() < 1e-3, "got {}", a4.width_in);
        assert!(
            (a4.height_in - 11.692_913).abs() < 1e-3,
            "got {}",
            a4.height_in,
        );
    }

    #[test]
    fn custom_centimeters_normalize_to_inches() {
        let paper = PaperSize::custom(21.0, 29.7, Unit::Centimeters).unwrap();
        assert_eq!(paper.key, "custom");
        assert!((paper.width_in - 8.267_716).abs() < 1e-3);
        assert!((paper.height_in - 11.692_913).abs() < 1e-3);
    }

    #[test]
    fn custom_inches_pass_through() {
        let paper = PaperSize::custom(9.0, 12.0, Unit::Inches).unwrap();
        assert!((paper.width_in - 9.0).abs() < f64::EPSILON);
        assert!((paper.height_in - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn custom_rejects_non_positive_dimensions() {
        assert!(matches!(
            PaperSize::custom(0.0, 11.0, Unit::Inches),
            Err(ExportError::InvalidPaperDimension { field: "width", .. }),
        ));
        assert!(matches!(
            PaperSize::custom(8.5, -1.0, Unit::Inches),
            Err(ExportError::InvalidPaperDimension { field: "height", .. }),
        ));
        assert!(matches!(
            PaperSize::custom(f64::NAN, 11.0, Unit::Inches),
            Err(ExportError::InvalidPaperDimension { field: "width", .. }),
        ));
    }

    #[test]
    fn paper_key_from_str_round_trips() {
        for key in PaperKey::ALL {
            let parsed: PaperKey = key.as_str().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn paper_key_from_str_rejects_unknown() {
        let result: Result<PaperKey, _> = "napkin".parse();
        assert!(matches!(
            result,
            Err(ExportError::UnknownPaperKey { ref key }) if key == "napkin",
        ));
    }

    #[test]
    fn selection_resolves_preset_and_custom() {
        let preset = PaperSelection::Preset {
            key: PaperKey::Legal,
        };
        assert_eq!(preset.resolve().unwrap().name, "US Legal");

        let custom = PaperSelection::Custom {
            width: 100.0,
            height: 200.0,
            unit: Unit::Millimeters,
        };
        let resolved = custom.resolve().unwrap();
        assert!((resolved.width_in - 100.0 / 25.4).abs() < 1e-9);
        assert!((resolved.height_in - 200.0 / 25.4).abs() < 1e-9);
    }

    #[test]
    fn four_inch_design_fits_letter() {
        let letter = PaperSize::preset(PaperKey::Letter);
        assert!(validate_fit(4.0, 4.0, &letter).is_ok());
    }

    #[test]
    fn ten_inch_design_exceeds_letter() {
        // 10 + 2 * 0.25 = 10.5 > 8.5 on the width axis.
        let letter = PaperSize::preset(PaperKey::Letter);
        let result = validate_fit(10.0, 10.0, &letter);
        assert!(matches!(
            result,
            Err(ExportError::DesignExceedsPaper {
                required_width_in,
                ..
            }) if (required_width_in - 10.5).abs() < f64::EPSILON,
        ));
    }

    #[test]
    fn exact_fit_is_accepted() {
        // 8 + 0.5 = 8.5 exactly fills the letter width.
        let letter = PaperSize::preset(PaperKey::Letter);
        assert!(validate_fit(8.0, 8.0, &letter).is_ok());
    }

    #[test]
    fn oversized_height_is_rejected() {
        let letter = PaperSize::preset(PaperKey::Letter);
        let result = validate_fit(4.0, 11.0, &letter);
        assert!(matches!(result, Err(ExportError::DesignExceedsPaper { .. })));
    }

    #[test]
    fn selection_serde_round_trip() {
        let selections = [
            PaperSelection::Preset {
                key: PaperKey::Tabloid,
            },
            PaperSelection::Custom {
                width: 8.0,
                height: 10.0,
                unit: Unit::Inches,
            },
        ];
        for selection in selections {
            let json = serde_json::to_string(&selection).unwrap();
            let deserialized: PaperSelection = serde_json::from_str(&json).unwrap();
            assert_eq!(selection, deserialized);
        }
    }
}
