//! Defaults for phase map construction and interferogram rendering
//!
//! A `PhaseConfig` is plain data: it can be built in code, or loaded from a
//! JSON file so command line tools share one set of defaults.

use crate::units::Unit;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Floating point precision used when generating new sample values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    F32,
    #[default]
    F64,
}

impl Precision {
    /// Round a value to the nearest representable number at this precision
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Precision::F32 => value as f32 as f64,
            Precision::F64 => value,
        }
    }
}

/// Resampling used when drawing a phase map larger than its sample grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// One filled cell per sample
    Nearest,
    #[default]
    Bilinear,
}

/// Construction and rendering defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    pub precision: Precision,
    /// Unit assumed for phase values when none is given
    pub phase_unit: Unit,
    /// Unit assumed for the x/y axes when none is given
    pub spatial_unit: Unit,
    /// Fringe visibility, 0 to 1
    pub visibility: f64,
    /// Number of passes through the optic under test
    pub passes: f64,
    pub interpolation: Interpolation,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            precision: Precision::F64,
            phase_unit: Unit::Nanometer,
            spatial_unit: Unit::Millimeter,
            visibility: 1.0,
            passes: 2.0,
            interpolation: Interpolation::Bilinear,
        }
    }
}

impl PhaseConfig {
    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Load from JSON file. Missing fields take their default values.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = PhaseConfig::default();
        assert_eq!(config.phase_unit, Unit::Nanometer);
        assert_eq!(config.spatial_unit, Unit::Millimeter);
        assert_eq!(config.precision, Precision::F64);
        assert_eq!(config.passes, 2.0);
    }

    #[test]
    fn test_precision_apply() {
        let third = 1.0 / 3.0;
        assert_eq!(Precision::F64.apply(third), third);
        assert_ne!(Precision::F32.apply(third), third);
        assert_eq!(Precision::F32.apply(7.0), 7.0);
    }

    #[test]
    fn test_file_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let config = PhaseConfig {
            precision: Precision::F32,
            phase_unit: Unit::Wave,
            spatial_unit: Unit::Micrometer,
            visibility: 0.8,
            passes: 1.0,
            interpolation: Interpolation::Nearest,
        };
        config.save_to_file(file.path()).unwrap();
        let loaded = PhaseConfig::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_aliases_and_defaults() {
        let config: PhaseConfig =
            serde_json::from_str(r#"{"phase_unit": "waves", "precision": "f32"}"#).unwrap();
        assert_eq!(config.phase_unit, Unit::Wave);
        assert_eq!(config.precision, Precision::F32);
        assert_eq!(config.spatial_unit, Unit::Millimeter);
    }

    #[test]
    fn test_bad_unit_in_file_is_invalid_data() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"spatial_unit": "furlong"}"#).unwrap();
        let err = PhaseConfig::load_from_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
