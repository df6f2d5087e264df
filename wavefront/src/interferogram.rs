//! Synthetic interferograms of a phase map
//!
//! The fringe pattern of a phase map seen in an interferometer is
//! `visibility * sin(2π · passes · φ)`, with φ in waves. This module computes
//! that pattern and draws it with `plotters` as a grayscale image spanning the
//! pupil extent `[-semidiameter, semidiameter]` on both axes, with a colorbar
//! fixed to [-1, 1].

use crate::config::{Interpolation, PhaseConfig};
use crate::phase::OpticalPhase;
use crate::units::{Unit, UnitError};
use log::debug;
use ndarray::Array2;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;
use thiserror::Error;

/// Sub-cells per sample along each axis for bilinear rendering
const BILINEAR_OVERSAMPLE: usize = 4;
/// Gradient steps drawn in the colorbar
const COLORBAR_STEPS: usize = 128;
const COLORBAR_LABEL: &str = "Wrapped Phase [λ]";

#[derive(Error, Debug)]
pub enum InterferogramError {
    #[error(transparent)]
    Unit(#[from] UnitError),
    #[error("cannot draw over a degenerate extent (semidiameter {0})")]
    DegenerateExtent(f64),
    #[error("drawing failed: {0}")]
    Drawing(String),
}

fn drawing_error<E>(err: DrawingAreaErrorKind<E>) -> InterferogramError
where
    E: std::error::Error + Send + Sync,
{
    InterferogramError::Drawing(err.to_string())
}

/// Interferometer parameters for fringe rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterferogramOptions {
    /// Fringe visibility, 0 to 1
    pub visibility: f64,
    /// Passes through the optic (2 for a double-pass test)
    pub passes: f64,
    pub interpolation: Interpolation,
}

impl Default for InterferogramOptions {
    fn default() -> Self {
        Self::from(&PhaseConfig::default())
    }
}

impl From<&PhaseConfig> for InterferogramOptions {
    fn from(config: &PhaseConfig) -> Self {
        Self {
            visibility: config.visibility,
            passes: config.passes,
            interpolation: config.interpolation,
        }
    }
}

impl OpticalPhase {
    /// Fringe intensity `visibility * sin(2π · passes · φ)`, φ in waves.
    ///
    /// # Errors
    /// [`UnitError::MissingWavelength`] if the phase is in a physical unit and
    /// no wavelength is set.
    pub fn fringes(&self, visibility: f64, passes: f64) -> Result<Array2<f64>, UnitError> {
        let waves = self.phase_in(Unit::Wave)?;
        let precision = self.precision();
        Ok(waves.mapv(|w| precision.apply(visibility * (2.0 * PI * passes * w).sin())))
    }
}

/// Resample `data` onto a grid `factor` times finer, bilinearly in sample
/// index space. Each input cell maps onto a `factor × factor` block.
fn resample_bilinear(data: &Array2<f64>, factor: usize) -> Array2<f64> {
    let (rows, cols) = data.dim();
    let coord = |i: usize, n: usize| -> (usize, usize, f64) {
        let pos = ((i as f64 + 0.5) / factor as f64 - 0.5).clamp(0.0, (n - 1) as f64);
        let low = pos.floor() as usize;
        let high = (low + 1).min(n - 1);
        (low, high, pos - low as f64)
    };

    Array2::from_shape_fn((rows * factor, cols * factor), |(r, c)| {
        let (r0, r1, wy) = coord(r, rows);
        let (c0, c1, wx) = coord(c, cols);
        let top = data[[r0, c0]] * (1.0 - wx) + data[[r0, c1]] * wx;
        let bottom = data[[r1, c0]] * (1.0 - wx) + data[[r1, c1]] * wx;
        top * (1.0 - wy) + bottom * wy
    })
}

/// Reversed grayscale: -1 is black, +1 is white.
fn gray(value: f64) -> RGBColor {
    let level = (((value + 1.0) / 2.0).clamp(0.0, 1.0) * 255.0).round() as u8;
    RGBColor(level, level, level)
}

/// Draw the interferogram of `phase` onto `area`.
///
/// The area is split into the image and a colorbar. The caller owns the
/// backend, so this can draw into any plotters surface, including a sub-area
/// of a larger figure.
pub fn render_interferogram<DB>(
    phase: &OpticalPhase,
    options: &InterferogramOptions,
    area: &DrawingArea<DB, Shift>,
) -> Result<(), InterferogramError>
where
    DB: DrawingBackend,
{
    let sd = phase.semidiameter();
    if !(sd.is_finite() && sd > 0.0) {
        return Err(InterferogramError::DegenerateExtent(sd));
    }

    let fringes = phase.fringes(options.visibility, options.passes)?;
    let image = match options.interpolation {
        Interpolation::Nearest => fringes,
        Interpolation::Bilinear => resample_bilinear(&fringes, BILINEAR_OVERSAMPLE),
    };
    let (rows, cols) = image.dim();
    debug!(
        "Rendering interferogram {rows}x{cols} over ±{sd} {}",
        phase.spatial_unit()
    );

    let (width, _) = area.dim_in_pixel();
    let (plot_area, bar_area) = area.split_horizontally((width as f64 * 0.82) as i32);

    let unit = phase.spatial_unit();
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-sd..sd, -sd..sd)
        .map_err(drawing_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(format!("Pupil ξ [{unit}]"))
        .y_desc(format!("Pupil η [{unit}]"))
        .x_label_formatter(&|v| format!("{v:.2}"))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()
        .map_err(drawing_error)?;

    // origin lower: row 0 at the bottom of the extent
    let dx = 2.0 * sd / cols as f64;
    let dy = 2.0 * sd / rows as f64;
    chart
        .draw_series(
            image
                .indexed_iter()
                .filter(|(_, v)| v.is_finite())
                .map(|((r, c), &v)| {
                    let x0 = -sd + c as f64 * dx;
                    let y0 = -sd + r as f64 * dy;
                    Rectangle::new([(x0, y0), (x0 + dx, y0 + dy)], gray(v).filled())
                }),
        )
        .map_err(drawing_error)?;

    let mut bar = ChartBuilder::on(&bar_area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..1.0, -1.0..1.0)
        .map_err(drawing_error)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(COLORBAR_LABEL)
        .y_label_formatter(&|v| format!("{v:.1}"))
        .draw()
        .map_err(drawing_error)?;

    let step = 2.0 / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let v0 = -1.0 + i as f64 * step;
        Rectangle::new([(0.0, v0), (1.0, v0 + step)], gray(v0 + step / 2.0).filled())
    }))
    .map_err(drawing_error)?;

    Ok(())
}

/// Render to a PNG file of `size` pixels.
pub fn save_interferogram_png(
    phase: &OpticalPhase,
    options: &InterferogramOptions,
    path: &Path,
    size: (u32, u32),
) -> Result<(), InterferogramError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;
    render_interferogram(phase, options, &root)?;
    root.present().map_err(drawing_error)?;
    Ok(())
}

/// Render to an SVG document.
pub fn interferogram_svg(
    phase: &OpticalPhase,
    options: &InterferogramOptions,
    size: (u32, u32),
) -> Result<String, InterferogramError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;
        render_interferogram(phase, options, &root)?;
        root.present().map_err(drawing_error)?;
    }
    Ok(svg)
}
