//! wavefront - Optical phase maps with unit-aware values and axes
//!
//! This crate models the phase of an optical wavefront, as measured from a
//! pupil or an interferogram, together with the units it is expressed in:
//!
//! - **Units** - canonical unit codes, aliases and the conversion table
//!   between meters, millimeters, microns, nanometers, angstroms, waves and
//!   pixels
//! - **Surface** - the sampled 2D grid with its x/y axes
//! - **Phase** - `OpticalPhase`, converting phase values and axes in place or
//!   into new arrays
//! - **Statistics** - PV, RMS, Sa and standard deviation of a phase map
//! - **Interferogram** - fringe patterns rendered with plotters
//!
//! # Example
//!
//! ```rust
//! use ndarray::{Array1, Array2};
//! use wavefront::OpticalPhase;
//!
//! let x = Array1::linspace(-10.0, 10.0, 64);
//! let y = x.clone();
//! let phase = Array2::from_shape_fn((64, 64), |(r, c)| (r + c) as f64);
//!
//! let mut pupil = OpticalPhase::new(x, y, phase)?.with_wavelength(0.6328)?;
//! pupil.change_phase_unit("waves")?.change_spatial_unit("px")?;
//! assert_eq!(pupil.x()[63], 63.0);
//! # Ok::<(), wavefront::PhaseError>(())
//! ```

use thiserror::Error;

pub mod config;
pub mod interferogram;
pub mod length;
pub mod phase;
pub mod stats;
pub mod surface;
pub mod units;

/// Error types for phase map operations.
#[derive(Debug, Error)]
pub enum PhaseError {
    #[error("Unit error: {0}")]
    Unit(#[from] units::UnitError),

    #[error("Surface error: {0}")]
    Surface(#[from] surface::SurfaceError),

    #[error("Statistics error: {0}")]
    Stats(#[from] stats::StatsError),

    #[error("Interferogram error: {0}")]
    Interferogram(#[from] interferogram::InterferogramError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Standard Result type for phase map operations.
pub type Result<T> = std::result::Result<T, PhaseError>;

// Re-exports for easier access
pub use config::{Interpolation, PhaseConfig, Precision};
pub use interferogram::{
    interferogram_svg, render_interferogram, save_interferogram_png, InterferogramOptions,
};
pub use length::LengthExt;
pub use phase::OpticalPhase;
pub use surface::MeasurementSurface;
pub use units::{factor, normalize, Unit, UnitError};
