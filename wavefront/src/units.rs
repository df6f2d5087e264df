//! Unit registry and conversion factors for phase values and spatial axes
//!
//! Phase maps and their sample axes are expressed in one of seven canonical
//! units: four physical lengths relative to the meter, the angstrom, the
//! illumination wavelength ("waves", λ) and detector pixels. Conversions
//! between physical lengths are constant factors; conversions touching λ
//! scale with the wavelength, which is always given in micrometers.
//!
//! All factors follow the same convention: `new_value = old_value / factor`.
//!
//! # Examples
//!
//! ```rust
//! use wavefront::units::{factor, normalize, Unit};
//!
//! let to = normalize("waves").unwrap();
//! assert_eq!(to, Unit::Wave);
//!
//! // 1 nm at HeNe wavelength, in waves
//! let f = factor(Unit::Nanometer, to, Some(0.6328)).unwrap();
//! assert!((1.0 / f - 1.0 / 632.8).abs() < 1e-12);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error types for unit lookups and conversions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("{unit} not a valid unit, must be in {valid}")]
    InvalidUnit { unit: String, valid: String },
    #[error("conversion from {from} to {to} requires a wavelength")]
    MissingWavelength { from: Unit, to: Unit },
    #[error("wavelength must be a positive, finite number of microns, got {0}")]
    InvalidWavelength(f64),
}

impl UnitError {
    fn invalid(unit: &str) -> Self {
        UnitError::InvalidUnit {
            unit: unit.to_string(),
            valid: VALID_ALIASES.clone(),
        }
    }
}

/// Canonical unit codes for phase values and spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    Meter,
    Millimeter,
    Micrometer,
    Nanometer,
    Angstrom,
    /// Multiples of the illumination wavelength
    Wave,
    /// Sample index; carries no physical scale
    Pixel,
}

/// Accepted spellings, matched after lower-casing the input.
///
/// `Å` is listed in its canonical form; lower-cased input `å` is special-cased
/// by [`normalize`].
pub const ALIASES: &[(&str, Unit)] = &[
    ("m", Unit::Meter),
    ("meter", Unit::Meter),
    ("mm", Unit::Millimeter),
    ("millimeter", Unit::Millimeter),
    ("μm", Unit::Micrometer),
    ("µm", Unit::Micrometer),
    ("um", Unit::Micrometer),
    ("micron", Unit::Micrometer),
    ("micrometer", Unit::Micrometer),
    ("nm", Unit::Nanometer),
    ("nanometer", Unit::Nanometer),
    ("Å", Unit::Angstrom),
    ("aa", Unit::Angstrom),
    ("angstrom", Unit::Angstrom),
    ("λ", Unit::Wave),
    ("waves", Unit::Wave),
    ("lambda", Unit::Wave),
    ("px", Unit::Pixel),
    ("pixel", Unit::Pixel),
];

static VALID_ALIASES: Lazy<String> = Lazy::new(|| {
    let mut names: Vec<&str> = ALIASES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    format!("{{{}}}", names.join(", "))
});

/// Factor between two canonical units, possibly scaled by the wavelength.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Conversion {
    Fixed(f64),
    /// `k * wavelength`
    TimesWavelength(f64),
    /// `k / wavelength`
    OverWavelength(f64),
}

use Conversion::{Fixed, OverWavelength as Over, TimesWavelength as Times};

/// Pairwise factors indexed `[from][to]` in [`Unit::ALL`] order.
///
/// The pixel row and column are all 1: pixels carry no scale to convert with.
#[rustfmt::skip]
const CONVERSIONS: [[Conversion; 7]; 7] = [
    // from m
    [Fixed(1.0), Fixed(1e-3), Fixed(1e-6), Fixed(1e-9), Fixed(1e-10), Times(1e-6), Fixed(1.0)],
    // from mm
    [Fixed(1e3), Fixed(1.0), Fixed(1e-3), Fixed(1e-6), Fixed(1e-7), Times(1e-3), Fixed(1.0)],
    // from μm
    [Fixed(1e6), Fixed(1e3), Fixed(1.0), Fixed(1e-3), Fixed(1e-4), Times(1.0), Fixed(1.0)],
    // from nm
    [Fixed(1e9), Fixed(1e6), Fixed(1e3), Fixed(1.0), Fixed(1e-1), Times(1e3), Fixed(1.0)],
    // from Å
    [Fixed(1e10), Fixed(1e7), Fixed(1e4), Fixed(10.0), Fixed(1.0), Times(1e4), Fixed(1.0)],
    // from λ
    [Over(1e6), Over(1e3), Over(1.0), Over(1e-3), Over(1e-4), Fixed(1.0), Fixed(1.0)],
    // from px
    [Fixed(1.0), Fixed(1.0), Fixed(1.0), Fixed(1.0), Fixed(1.0), Fixed(1.0), Fixed(1.0)],
];

impl Unit {
    /// Every canonical unit, in conversion table order
    pub const ALL: [Unit; 7] = [
        Unit::Meter,
        Unit::Millimeter,
        Unit::Micrometer,
        Unit::Nanometer,
        Unit::Angstrom,
        Unit::Wave,
        Unit::Pixel,
    ];

    /// Canonical code used for storage and display
    pub fn code(&self) -> &'static str {
        match self {
            Unit::Meter => "m",
            Unit::Millimeter => "mm",
            Unit::Micrometer => "μm",
            Unit::Nanometer => "nm",
            Unit::Angstrom => "Å",
            Unit::Wave => "λ",
            Unit::Pixel => "px",
        }
    }

    fn index(&self) -> usize {
        match self {
            Unit::Meter => 0,
            Unit::Millimeter => 1,
            Unit::Micrometer => 2,
            Unit::Nanometer => 3,
            Unit::Angstrom => 4,
            Unit::Wave => 5,
            Unit::Pixel => 6,
        }
    }

    /// Size of one unit in meters, for physical length units only.
    pub fn meters_per_unit(&self) -> Option<f64> {
        match self {
            Unit::Meter => Some(1.0),
            Unit::Millimeter => Some(1e-3),
            Unit::Micrometer => Some(1e-6),
            Unit::Nanometer => Some(1e-9),
            Unit::Angstrom => Some(1e-10),
            Unit::Wave | Unit::Pixel => None,
        }
    }

    /// True for units with a fixed physical scale
    pub fn is_linear(&self) -> bool {
        self.meters_per_unit().is_some()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl TryFrom<String> for Unit {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.code().to_string()
    }
}

/// Resolve any accepted spelling to its canonical unit.
///
/// Matching is case-insensitive. The accented `Å` lower-cases to `å`, which
/// is not in the alias table and is mapped to [`Unit::Angstrom`] directly.
///
/// # Errors
/// [`UnitError::InvalidUnit`] listing every accepted alias.
pub fn normalize(unit: &str) -> Result<Unit, UnitError> {
    let lowered = unit.to_lowercase();
    if lowered == "å" {
        return Ok(Unit::Angstrom);
    }

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| *canonical)
        .ok_or_else(|| UnitError::invalid(unit))
}

/// Conversion factor from `from` to `to`, such that `new = old / factor`.
///
/// `wavelength_um` is only consulted for pairs that scale with the
/// wavelength (a physical length to or from λ).
///
/// # Errors
/// [`UnitError::MissingWavelength`] when the pair scales with the wavelength
/// and none was supplied.
pub fn factor(from: Unit, to: Unit, wavelength_um: Option<f64>) -> Result<f64, UnitError> {
    let missing = || UnitError::MissingWavelength { from, to };
    match CONVERSIONS[from.index()][to.index()] {
        Fixed(k) => Ok(k),
        Times(k) => wavelength_um.map(|w| k * w).ok_or_else(missing),
        Over(k) => wavelength_um.map(|w| k / w).ok_or_else(missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const WAVELENGTHS: [f64; 4] = [0.3, 0.5, 0.6328, 10.6];

    #[test]
    fn test_factor_symmetry() {
        for &w in &WAVELENGTHS {
            for a in Unit::ALL {
                for b in Unit::ALL {
                    let forward = factor(a, b, Some(w)).unwrap();
                    let backward = factor(b, a, Some(w)).unwrap();
                    assert_relative_eq!(forward, 1.0 / backward, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_identity_factor() {
        for a in Unit::ALL {
            assert_eq!(factor(a, a, None).unwrap(), 1.0);
            assert_eq!(factor(a, a, Some(0.55)).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_linear_factors_match_scale_table() {
        for a in Unit::ALL.iter().filter(|u| u.is_linear()) {
            for b in Unit::ALL.iter().filter(|u| u.is_linear()) {
                let expected = b.meters_per_unit().unwrap() / a.meters_per_unit().unwrap();
                assert_relative_eq!(factor(*a, *b, None).unwrap(), expected, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_micron_to_waves_is_wavelength() {
        assert_eq!(factor(Unit::Micrometer, Unit::Wave, Some(0.5)).unwrap(), 0.5);
        assert_eq!(factor(Unit::Wave, Unit::Micrometer, Some(0.5)).unwrap(), 2.0);
    }

    #[test]
    fn test_nm_to_waves() {
        let f = factor(Unit::Nanometer, Unit::Wave, Some(0.6328)).unwrap();
        assert_relative_eq!(f, 632.8, max_relative = 1e-12);
    }

    #[test]
    fn test_missing_wavelength() {
        for a in Unit::ALL.iter().filter(|u| u.is_linear()) {
            assert_eq!(
                factor(*a, Unit::Wave, None),
                Err(UnitError::MissingWavelength {
                    from: *a,
                    to: Unit::Wave
                })
            );
            assert!(factor(Unit::Wave, *a, None).is_err());
        }
        // neither depends on the wavelength
        assert_eq!(factor(Unit::Wave, Unit::Pixel, None).unwrap(), 1.0);
        assert_eq!(factor(Unit::Pixel, Unit::Wave, None).unwrap(), 1.0);
    }

    #[test]
    fn test_pixel_factors_are_one() {
        for a in Unit::ALL {
            assert_eq!(factor(Unit::Pixel, a, Some(0.5)).unwrap(), 1.0);
            assert_eq!(factor(a, Unit::Pixel, Some(0.5)).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_normalize_aliases() {
        for alias in ["micron", "um", "μm", "µm", "micrometer", "MICRON", "Um"] {
            assert_eq!(normalize(alias).unwrap(), Unit::Micrometer, "{alias}");
        }
        assert_eq!(normalize("Å").unwrap(), Unit::Angstrom);
        assert_eq!(normalize("å").unwrap(), Unit::Angstrom);
        assert_eq!(normalize("AA").unwrap(), Unit::Angstrom);
        assert_eq!(normalize("Waves").unwrap(), Unit::Wave);
        assert_eq!(normalize("λ").unwrap(), Unit::Wave);
        assert_eq!(normalize("Pixel").unwrap(), Unit::Pixel);
        assert_eq!(normalize("METER").unwrap(), Unit::Meter);
    }

    #[test]
    fn test_every_alias_normalizes_to_its_entry() {
        for (alias, unit) in ALIASES {
            assert_eq!(normalize(alias).unwrap(), *unit);
        }
    }

    #[test]
    fn test_invalid_unit_lists_aliases() {
        let err = normalize("furlong").unwrap_err();
        match &err {
            UnitError::InvalidUnit { unit, valid } => {
                assert_eq!(unit, "furlong");
                for (alias, _) in ALIASES {
                    assert!(valid.contains(alias), "{alias} missing from {valid}");
                }
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().starts_with("furlong not a valid unit"));
    }

    #[test]
    fn test_codes_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(normalize(unit.code()).unwrap(), unit);
            assert_eq!(unit.code().parse::<Unit>().unwrap(), unit);
            assert_eq!(unit.to_string(), unit.code());
        }
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&Unit::Micrometer).unwrap();
        assert_eq!(json, "\"μm\"");
        let parsed: Unit = serde_json::from_str("\"nanometer\"").unwrap();
        assert_eq!(parsed, Unit::Nanometer);
        assert!(serde_json::from_str::<Unit>("\"parsec\"").is_err());
    }
}
