//! Render the interferogram of a synthetic pupil
//!
//! Builds a circular pupil with defocus and tilt, reports its error
//! statistics in the requested unit and saves the fringe pattern as a PNG.
//!
//! Usage:
//! ```
//! cargo run --bin interferogram_plot -- --defocus 150 --tilt 300 --report-unit waves
//! ```

use clap::Parser;
use ndarray::{Array1, Array2};
use std::path::PathBuf;
use wavefront::{
    save_interferogram_png, Interpolation, InterferogramOptions, OpticalPhase, PhaseConfig,
};

/// Command line arguments for the interferogram renderer
#[derive(Parser, Debug)]
#[command(
    name = "Interferogram Plot",
    about = "Renders the interferogram of a synthetic defocused, tilted pupil"
)]
struct Args {
    /// JSON file with default units, precision and fringe settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Samples across the pupil
    #[arg(long, default_value_t = 256)]
    samples: usize,

    /// Pupil diameter, in the spatial unit
    #[arg(long, default_value_t = 25.4)]
    diameter: f64,

    /// Peak-to-valley defocus, in the phase unit
    #[arg(long, default_value_t = 150.0)]
    defocus: f64,

    /// Peak-to-valley tilt along x, in the phase unit
    #[arg(long, default_value_t = 0.0)]
    tilt: f64,

    /// Unit of the defocus and tilt amplitudes (overrides the config)
    #[arg(long)]
    phase_unit: Option<String>,

    /// Unit of the pupil diameter (overrides the config)
    #[arg(long)]
    spatial_unit: Option<String>,

    /// Wavelength in microns
    #[arg(long, default_value_t = 0.6328)]
    wavelength: f64,

    /// Unit used when printing statistics
    #[arg(long, default_value = "waves")]
    report_unit: String,

    /// Fringe visibility (overrides the config)
    #[arg(long)]
    visibility: Option<f64>,

    /// Passes through the optic (overrides the config)
    #[arg(long)]
    passes: Option<f64>,

    /// Draw one cell per sample instead of bilinear resampling
    #[arg(long, default_value_t = false)]
    nearest: bool,

    /// Output image path
    #[arg(long, default_value = "plots/interferogram.png")]
    output: PathBuf,
}

/// Circular pupil with defocus (Zernike Z4 shape) and x tilt, NaN outside.
fn synthetic_pupil(samples: usize, diameter: f64, defocus: f64, tilt: f64) -> Array2<f64> {
    let radius = diameter / 2.0;
    let axis = Array1::linspace(-radius, radius, samples);
    Array2::from_shape_fn((samples, samples), |(r, c)| {
        let (x, y) = (axis[c] / radius, axis[r] / radius);
        let rho_sq = x * x + y * y;
        if rho_sq > 1.0 {
            f64::NAN
        } else {
            defocus / 2.0 * (2.0 * rho_sq - 1.0) + tilt / 2.0 * x
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging from environment variables
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PhaseConfig::load_from_file(path)?,
        None => PhaseConfig::default(),
    };
    let mut options = InterferogramOptions::from(&config);
    if let Some(visibility) = args.visibility {
        options.visibility = visibility;
    }
    if let Some(passes) = args.passes {
        options.passes = passes;
    }
    if args.nearest {
        options.interpolation = Interpolation::Nearest;
    }

    let radius = args.diameter / 2.0;
    let x = Array1::linspace(-radius, radius, args.samples);
    let y = x.clone();
    let data = synthetic_pupil(args.samples, args.diameter, args.defocus, args.tilt);

    let mut pupil = OpticalPhase::from_config(x, y, data, &config)?
        .with_wavelength(args.wavelength)?
        .with_labels("ξ", "η", "OPD");
    if let Some(unit) = &args.phase_unit {
        pupil.set_phase_unit(unit)?;
    }
    if let Some(unit) = &args.spatial_unit {
        pupil.set_spatial_unit(unit)?;
    }

    println!(
        "Pupil: {} samples, diameter {:.3} {}, λ = {} μm",
        args.samples,
        pupil.diameter(),
        pupil.spatial_unit(),
        args.wavelength
    );

    let mut report = pupil.clone();
    report.change_phase_unit(&args.report_unit)?;
    let unit = report.phase_unit();
    println!("  PV:  {:.4} {unit}", report.pv()?);
    println!("  RMS: {:.4} {unit}", report.rms()?);
    println!("  Sa:  {:.4} {unit}", report.sa()?);
    println!("  Std: {:.4} {unit}", report.std()?);

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    save_interferogram_png(&pupil, &options, &args.output, (900, 760))?;

    println!("Interferogram saved to: {}", args.output.display());
    Ok(())
}
