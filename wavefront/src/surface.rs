//! Sampled 2D data on a pair of ordinate axes
//!
//! `MeasurementSurface` is the container shared by anything measured on a
//! regular grid: two 1D axes, a 2D array indexed `[row (y), column (x)]`,
//! plot labels and the units of the axes and of the data.

use crate::units::Unit;
use ndarray::{Array1, Array2, ArrayView1};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("{0} axis is empty")]
    EmptyAxis(&'static str),
    #[error("data shape {data_shape:?} does not match axes (y: {y_len}, x: {x_len})")]
    DimensionMismatch {
        x_len: usize,
        y_len: usize,
        data_shape: (usize, usize),
    },
}

/// Axis labels used when plotting a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            x: "x".to_string(),
            y: "y".to_string(),
            z: "z".to_string(),
        }
    }
}

/// 2D samples with their axes, labels and units.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSurface {
    pub(crate) x: Array1<f64>,
    pub(crate) y: Array1<f64>,
    pub(crate) data: Array2<f64>,
    pub labels: Labels,
    pub(crate) xy_unit: Unit,
    pub(crate) z_unit: Unit,
}

impl MeasurementSurface {
    /// Create a new surface.
    ///
    /// # Arguments
    /// * `x` - column coordinates, length equal to the number of columns
    /// * `y` - row coordinates, length equal to the number of rows
    /// * `data` - samples with shape `(y.len(), x.len())`
    pub fn new(
        x: Array1<f64>,
        y: Array1<f64>,
        data: Array2<f64>,
        xy_unit: Unit,
        z_unit: Unit,
    ) -> Result<Self, SurfaceError> {
        if x.is_empty() {
            return Err(SurfaceError::EmptyAxis("x"));
        }
        if y.is_empty() {
            return Err(SurfaceError::EmptyAxis("y"));
        }
        check_shape(x.len(), y.len(), data.dim())?;

        Ok(Self {
            x,
            y,
            data,
            labels: Labels::default(),
            xy_unit,
            z_unit,
        })
    }

    /// Replace the plot labels
    pub fn with_labels(mut self, x: &str, y: &str, z: &str) -> Self {
        self.labels = Labels {
            x: x.to_string(),
            y: y.to_string(),
            z: z.to_string(),
        };
        self
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn xy_unit(&self) -> Unit {
        self.xy_unit
    }

    pub fn z_unit(&self) -> Unit {
        self.z_unit
    }

    /// Replace the data, keeping the axes. The shape must not change.
    pub fn set_data(&mut self, data: Array2<f64>) -> Result<(), SurfaceError> {
        check_shape(self.x.len(), self.y.len(), data.dim())?;
        self.data = data;
        Ok(())
    }

    /// Replace both axes. Lengths must match the data.
    pub fn set_axes(&mut self, x: Array1<f64>, y: Array1<f64>) -> Result<(), SurfaceError> {
        check_shape(x.len(), y.len(), self.data.dim())?;
        self.x = x;
        self.y = y;
        Ok(())
    }

    /// (rows, columns) of the data
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of samples
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn samples_x(&self) -> usize {
        self.x.len()
    }

    pub fn samples_y(&self) -> usize {
        self.y.len()
    }

    /// Spacing between the first two x samples, 0 for a single column
    pub fn sample_spacing(&self) -> f64 {
        if self.x.len() < 2 {
            0.0
        } else {
            self.x[1] - self.x[0]
        }
    }

    /// Index of the center column
    pub fn center_x(&self) -> usize {
        self.x.len() / 2
    }

    /// Index of the center row
    pub fn center_y(&self) -> usize {
        self.y.len() / 2
    }

    /// The row through the center, running along x
    pub fn slice_x(&self) -> ArrayView1<'_, f64> {
        self.data.row(self.center_y())
    }

    /// The column through the center, running along y
    pub fn slice_y(&self) -> ArrayView1<'_, f64> {
        self.data.column(self.center_x())
    }
}

fn check_shape(x_len: usize, y_len: usize, data_shape: (usize, usize)) -> Result<(), SurfaceError> {
    if data_shape != (y_len, x_len) {
        return Err(SurfaceError::DimensionMismatch {
            x_len,
            y_len,
            data_shape,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn make_surface() -> MeasurementSurface {
        let x = Array1::linspace(-1.0, 1.0, 5);
        let y = Array1::linspace(-2.0, 2.0, 3);
        let data = Array2::from_shape_fn((3, 5), |(r, c)| (r * 10 + c) as f64);
        MeasurementSurface::new(x, y, data, Unit::Millimeter, Unit::Nanometer).unwrap()
    }

    #[test]
    fn test_shape_queries() {
        let s = make_surface();
        assert_eq!(s.shape(), (3, 5));
        assert_eq!(s.size(), 15);
        assert_eq!(s.samples_x(), 5);
        assert_eq!(s.samples_y(), 3);
        assert_eq!(s.sample_spacing(), 0.5);
        assert_eq!((s.center_x(), s.center_y()), (2, 1));
    }

    #[test]
    fn test_center_slices() {
        let s = make_surface();
        assert_eq!(s.slice_x(), array![10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(s.slice_y(), array![2.0, 12.0, 22.0]);
    }

    #[test]
    fn test_default_labels() {
        let s = make_surface();
        assert_eq!(s.labels, Labels::default());
        let s = s.with_labels("ξ", "η", "OPD");
        assert_eq!(s.labels.z, "OPD");
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = MeasurementSurface::new(
            Array1::zeros(4),
            Array1::zeros(3),
            Array2::zeros((4, 3)),
            Unit::Millimeter,
            Unit::Nanometer,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SurfaceError::DimensionMismatch {
                x_len: 4,
                y_len: 3,
                data_shape: (4, 3)
            }
        );
    }

    #[test]
    fn test_empty_axis_rejected() {
        let err = MeasurementSurface::new(
            Array1::zeros(0),
            Array1::zeros(1),
            Array2::zeros((1, 0)),
            Unit::Millimeter,
            Unit::Nanometer,
        )
        .unwrap_err();
        assert_eq!(err, SurfaceError::EmptyAxis("x"));
    }

    #[test]
    fn test_setters_keep_shape() {
        let mut s = make_surface();
        assert!(s.set_data(Array2::zeros((5, 3))).is_err());
        assert!(s.set_data(Array2::ones((3, 5))).is_ok());
        assert!(s.set_axes(Array1::zeros(3), Array1::zeros(5)).is_err());
        assert!(s.set_axes(Array1::zeros(5), Array1::zeros(3)).is_ok());
    }

    #[test]
    fn test_single_sample_spacing() {
        let s = MeasurementSurface::new(
            array![0.0],
            array![0.0],
            array![[1.0]],
            Unit::Pixel,
            Unit::Wave,
        )
        .unwrap();
        assert_eq!(s.sample_spacing(), 0.0);
    }
}
