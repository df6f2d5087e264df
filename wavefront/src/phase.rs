//! Optical phase maps with unit-aware phase values and axes
//!
//! An [`OpticalPhase`] is a [`MeasurementSurface`] whose data is the phase of
//! an optical field, e.g. a pupil function or a reduced interferogram. The
//! phase values and the x/y axes each carry a canonical [`Unit`], and both can
//! be converted between physical lengths, waves of the illumination
//! wavelength and pixels.
//!
//! # Examples
//!
//! ```rust
//! use ndarray::array;
//! use wavefront::OpticalPhase;
//!
//! let data = array![[0.0, 316.4], [632.8, 0.0]];
//! let mut phase = OpticalPhase::new(array![0.0, 1.0], array![0.0, 1.0], data)
//!     .unwrap()
//!     .with_wavelength(0.6328)
//!     .unwrap();
//!
//! phase.change_phase_unit("waves").unwrap().change_spatial_unit("px").unwrap();
//! assert!((phase.pv().unwrap() - 1.0).abs() < 1e-12);
//! ```

use crate::config::{PhaseConfig, Precision};
use crate::length::LengthExt;
use crate::stats::{self, StatsError};
use crate::surface::{MeasurementSurface, SurfaceError};
use crate::units::{factor, normalize, Unit, UnitError};
use log::{debug, warn};
use ndarray::{Array1, Array2};
use uom::si::f64::Length;

/// Phase of an optical field sampled on a 2D grid.
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalPhase {
    surface: MeasurementSurface,
    /// Illumination wavelength in microns
    wavelength: Option<f64>,
    precision: Precision,
}

impl OpticalPhase {
    /// Create a phase map in the default units (mm axes, nm phase) with no
    /// wavelength.
    ///
    /// # Arguments
    /// * `x` - column coordinates
    /// * `y` - row coordinates
    /// * `phase` - phase samples with shape `(y.len(), x.len())`
    pub fn new(x: Array1<f64>, y: Array1<f64>, phase: Array2<f64>) -> crate::Result<Self> {
        Self::from_config(x, y, phase, &PhaseConfig::default())
    }

    /// Create a phase map using the units and precision from `config`
    pub fn from_config(
        x: Array1<f64>,
        y: Array1<f64>,
        phase: Array2<f64>,
        config: &PhaseConfig,
    ) -> crate::Result<Self> {
        let surface =
            MeasurementSurface::new(x, y, phase, config.spatial_unit, config.phase_unit)?;
        Ok(Self {
            surface,
            wavelength: None,
            precision: config.precision,
        })
    }

    /// Relabel the axes and phase units without converting any values
    pub fn with_units(mut self, spatial_unit: &str, phase_unit: &str) -> crate::Result<Self> {
        self.set_spatial_unit(spatial_unit)?;
        self.set_phase_unit(phase_unit)?;
        Ok(self)
    }

    /// Set the wavelength, in microns
    pub fn with_wavelength(mut self, wavelength_um: f64) -> crate::Result<Self> {
        self.set_wavelength(Some(wavelength_um))?;
        Ok(self)
    }

    /// Set the wavelength from a typed length
    pub fn with_wavelength_length(self, wavelength: Length) -> crate::Result<Self> {
        self.with_wavelength(wavelength.as_micrometers())
    }

    pub fn with_labels(mut self, x: &str, y: &str, z: &str) -> Self {
        self.surface = self.surface.with_labels(x, y, z);
        self
    }

    pub fn surface(&self) -> &MeasurementSurface {
        &self.surface
    }

    pub fn phase(&self) -> &Array2<f64> {
        self.surface.data()
    }

    /// Replace the phase samples. The shape must not change; the unit is kept.
    pub fn set_phase(&mut self, phase: Array2<f64>) -> Result<(), SurfaceError> {
        self.surface.set_data(phase)
    }

    pub fn x(&self) -> &Array1<f64> {
        self.surface.x()
    }

    pub fn y(&self) -> &Array1<f64> {
        self.surface.y()
    }

    /// (rows, columns) of the phase grid
    pub fn shape(&self) -> (usize, usize) {
        self.surface.shape()
    }

    pub fn phase_unit(&self) -> Unit {
        self.surface.z_unit()
    }

    pub fn spatial_unit(&self) -> Unit {
        self.surface.xy_unit()
    }

    /// Wavelength in microns, if known
    pub fn wavelength(&self) -> Option<f64> {
        self.wavelength
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Relabel the phase unit without converting the values.
    ///
    /// Any alias is accepted and stored in its canonical form.
    pub fn set_phase_unit(&mut self, unit: &str) -> Result<(), UnitError> {
        self.surface.z_unit = normalize(unit)?;
        Ok(())
    }

    /// Relabel the spatial unit without converting the axes.
    pub fn set_spatial_unit(&mut self, unit: &str) -> Result<(), UnitError> {
        self.surface.xy_unit = normalize(unit)?;
        Ok(())
    }

    /// Set or clear the wavelength, in microns. Must be positive and finite.
    pub fn set_wavelength(&mut self, wavelength_um: Option<f64>) -> Result<(), UnitError> {
        if let Some(w) = wavelength_um {
            if !w.is_finite() || w <= 0.0 {
                return Err(UnitError::InvalidWavelength(w));
            }
        }
        self.wavelength = wavelength_um;
        Ok(())
    }

    /// Peak-to-valley phase error. DIN/ISO St.
    pub fn pv(&self) -> Result<f64, StatsError> {
        stats::pv(self.phase())
    }

    /// RMS phase error. DIN/ISO Sq.
    pub fn rms(&self) -> Result<f64, StatsError> {
        stats::rms(self.phase())
    }

    /// Mean absolute phase error. DIN/ISO Sa.
    pub fn sa(&self) -> Result<f64, StatsError> {
        stats::sa(self.phase())
    }

    /// Standard deviation of the phase error
    pub fn std(&self) -> Result<f64, StatsError> {
        stats::std(self.phase())
    }

    /// Span of the x axis
    pub fn diameter_x(&self) -> f64 {
        let x = self.x();
        x[x.len() - 1] - x[0]
    }

    /// Span from the first x sample to the last y sample.
    ///
    /// Mixes the two axes; equal to the y span only when the axes share an
    /// origin, which holds for the usual centered pupil grids.
    pub fn diameter_y(&self) -> f64 {
        let y = self.y();
        y[y.len() - 1] - self.x()[0]
    }

    /// Greater of [`Self::diameter_x`] and [`Self::diameter_y`]
    pub fn diameter(&self) -> f64 {
        self.diameter_x().max(self.diameter_y())
    }

    pub fn semidiameter(&self) -> f64 {
        self.diameter() / 2.0
    }

    fn conversion_factor(&self, from: Unit, to: Unit) -> Result<f64, UnitError> {
        let f = factor(from, to, self.wavelength)?;
        if from == Unit::Pixel && to != Unit::Pixel {
            warn!("Converting from px to {to} has no physical scale; values are left unchanged");
        }
        debug!("Unit conversion {from} -> {to}, factor {f}");
        Ok(f)
    }

    /// The phase expressed in another unit, leaving `self` untouched.
    ///
    /// # Errors
    /// * [`UnitError::InvalidUnit`] if `to` is not a known alias
    /// * [`UnitError::MissingWavelength`] if the conversion involves waves and
    ///   no wavelength is set
    pub fn convert_phase(&self, to: &str) -> Result<Array2<f64>, UnitError> {
        self.phase_in(normalize(to)?)
    }

    pub(crate) fn phase_in(&self, unit: Unit) -> Result<Array2<f64>, UnitError> {
        let f = self.conversion_factor(self.phase_unit(), unit)?;
        Ok(self.phase().mapv(|v| v / f))
    }

    /// Convert the phase to another unit in place.
    ///
    /// Returns `self` so conversions can be chained. On error nothing is
    /// modified.
    pub fn change_phase_unit(&mut self, to: &str) -> Result<&mut Self, UnitError> {
        let unit = normalize(to)?;
        let new_phase = self.phase_in(unit)?;
        self.surface.data = new_phase;
        self.surface.z_unit = unit;
        Ok(self)
    }

    /// The x and y axes expressed in another unit, leaving `self` untouched.
    ///
    /// Converting to pixels discards the current scale and returns sample
    /// indices `0..n` for each axis.
    pub fn convert_axes(&self, to: &str) -> Result<(Array1<f64>, Array1<f64>), UnitError> {
        self.axes_in(normalize(to)?)
    }

    fn axes_in(&self, unit: Unit) -> Result<(Array1<f64>, Array1<f64>), UnitError> {
        if unit == Unit::Pixel {
            let (rows, cols) = self.shape();
            return Ok((self.index_axis(cols), self.index_axis(rows)));
        }

        let f = self.conversion_factor(self.spatial_unit(), unit)?;
        Ok((self.x().mapv(|v| v / f), self.y().mapv(|v| v / f)))
    }

    fn index_axis(&self, len: usize) -> Array1<f64> {
        Array1::from_iter((0..len).map(|i| self.precision.apply(i as f64)))
    }

    /// Convert the x and y axes to another unit in place.
    ///
    /// Returns `self` so conversions can be chained. On error nothing is
    /// modified.
    pub fn change_spatial_unit(&mut self, to: &str) -> Result<&mut Self, UnitError> {
        let unit = normalize(to)?;
        let (x, y) = self.axes_in(unit)?;
        self.surface.x = x;
        self.surface.y = y;
        self.surface.xy_unit = unit;
        Ok(self)
    }
}
