//! Stencil size catalog: named physical sizes at the reference resolution.
//!
//! Every stencil is rendered to a square canvas whose edge length is the
//! preset's physical size in inches multiplied by [`REFERENCE_DPI`].
//! The catalog is fixed at compile time; the only fallible operation is
//! parsing a key string at the API boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::StencilError;

/// Reference print resolution in dots per inch.
///
/// All physical-size calculations in the system use this value.
pub const REFERENCE_DPI: u32 = 300;

/// Key naming one of the four stencil size presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeKey {
    /// 4 inch stencil.
    Small,
    /// 6 inch stencil.
    Medium,
    /// 8 inch stencil.
    Large,
    /// 10 inch stencil.
    Xlarge,
}

impl SizeKey {
    /// All size keys, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::Xlarge];

    /// The catalog key string for this size.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Xlarge => "xlarge",
        }
    }
}

impl fmt::Display for SizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeKey {
    type Err = StencilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            "xlarge" => Ok(Self::Xlarge),
            other => Err(StencilError::UnknownSizeKey {
                key: other.to_string(),
            }),
        }
    }
}

/// A named stencil size: physical inches and the pixel edge length of
/// the square canvas at [`REFERENCE_DPI`].
///
/// Invariant: `pixels == round(inches * REFERENCE_DPI)` for every
/// preset in the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePreset {
    /// Catalog key.
    pub key: SizeKey,
    /// Short display label.
    pub label: &'static str,
    /// Physical edge length in inches.
    pub inches: f64,
    /// Pixel edge length at the reference resolution.
    pub pixels: u32,
    /// Placement guidance shown to artists.
    pub description: &'static str,
}

impl SizePreset {
    /// Look up the preset for a size key.
    #[must_use]
    pub const fn resolve(key: SizeKey) -> Self {
        match key {
            SizeKey::Small => Self {
                key,
                label: "Small (4\")",
                inches: 4.0,
                pixels: 1200,
                description: "Wrist, ankle, behind the ear",
            },
            SizeKey::Medium => Self {
                key,
                label: "Medium (6\")",
                inches: 6.0,
                pixels: 1800,
                description: "Forearm, calf",
            },
            SizeKey::Large => Self {
                key,
                label: "Large (8\")",
                inches: 8.0,
                pixels: 2400,
                description: "Upper arm, shoulder blade",
            },
            SizeKey::Xlarge => Self {
                key,
                label: "Extra large (10\")",
                inches: 10.0,
                pixels: 3000,
                description: "Back, thigh",
            },
        }
    }
}

/// Pixel edge length of the square canvas for a size key.
#[must_use]
pub const fn pixels_for(key: SizeKey) -> u32 {
    SizePreset::resolve(key).pixels
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pixels_match_inches_at_reference_dpi() {
        for key in SizeKey::ALL {
            let preset = SizePreset::resolve(key);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let expected = (preset.inches * f64::from(REFERENCE_DPI)).round() as u32;
            assert_eq!(
                preset.pixels, expected,
                "{key}: pixels must equal round(inches * {REFERENCE_DPI})",
            );
        }
    }

    #[test]
    fn catalog_pixel_values() {
        assert_eq!(pixels_for(SizeKey::Small), 1200);
        assert_eq!(pixels_for(SizeKey::Medium), 1800);
        assert_eq!(pixels_for(SizeKey::Large), 2400);
        assert_eq!(pixels_for(SizeKey::Xlarge), 3000);
    }

    #[test]
    fn resolve_returns_matching_key() {
        for key in SizeKey::ALL {
            assert_eq!(SizePreset::resolve(key).key, key);
        }
    }

    #[test]
    fn from_str_parses_all_keys() {
        for key in SizeKey::ALL {
            let parsed: SizeKey = key.as_str().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn from_str_rejects_unknown_key() {
        let result: Result<SizeKey, _> = "gigantic".parse();
        assert!(matches!(
            result,
            Err(StencilError::UnknownSizeKey { ref key }) if key == "gigantic",
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for key in SizeKey::ALL {
            let parsed: SizeKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&SizeKey::Xlarge).unwrap();
        assert_eq!(json, r#""xlarge""#);
        let parsed: SizeKey = serde_json::from_str(r#""small""#).unwrap();
        assert_eq!(parsed, SizeKey::Small);
    }
}
