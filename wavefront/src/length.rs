//! Typed lengths for wavelengths and physical axis values
//!
//! Bridges the string-coded [`Unit`] registry to `uom` lengths, so callers
//! holding a typed wavelength (or wanting one back) never juggle raw scale
//! factors.

use crate::units::Unit;
use uom::si::f64::Length;
use uom::si::length::{angstrom, meter, micrometer, millimeter, nanometer};

/// Extension trait for the length conversions used by phase maps
pub trait LengthExt {
    /// Create length from nanometers
    fn from_nanometers(nm: f64) -> Self;

    /// Get length in nanometers
    fn as_nanometers(&self) -> f64;

    /// Create length from micrometers (wavelengths)
    fn from_micrometers(um: f64) -> Self;

    /// Get length in micrometers
    fn as_micrometers(&self) -> f64;

    /// Create length from millimeters (pupil coordinates)
    fn from_millimeters(mm: f64) -> Self;

    /// Get length in millimeters
    fn as_millimeters(&self) -> f64;

    fn from_angstroms(aa: f64) -> Self;

    fn as_angstroms(&self) -> f64;

    fn from_meters(m: f64) -> Self;

    fn as_meters(&self) -> f64;
}

impl LengthExt for Length {
    fn from_nanometers(nm: f64) -> Self {
        Length::new::<nanometer>(nm)
    }

    fn as_nanometers(&self) -> f64 {
        self.get::<nanometer>()
    }

    fn from_micrometers(um: f64) -> Self {
        Length::new::<micrometer>(um)
    }

    fn as_micrometers(&self) -> f64 {
        self.get::<micrometer>()
    }

    fn from_millimeters(mm: f64) -> Self {
        Length::new::<millimeter>(mm)
    }

    fn as_millimeters(&self) -> f64 {
        self.get::<millimeter>()
    }

    fn from_angstroms(aa: f64) -> Self {
        Length::new::<angstrom>(aa)
    }

    fn as_angstroms(&self) -> f64 {
        self.get::<angstrom>()
    }

    fn from_meters(m: f64) -> Self {
        Length::new::<meter>(m)
    }

    fn as_meters(&self) -> f64 {
        self.get::<meter>()
    }
}

impl Unit {
    /// Express `value` of this unit as a typed length.
    ///
    /// Returns `None` for λ and px, which have no fixed physical scale.
    pub fn length(&self, value: f64) -> Option<Length> {
        self.meters_per_unit()
            .map(|scale| Length::from_meters(value * scale))
    }

    /// Magnitude of `length` in this unit, `None` for λ and px
    pub fn value_of(&self, length: Length) -> Option<f64> {
        self.meters_per_unit()
            .map(|scale| length.as_meters() / scale)
    }
}
